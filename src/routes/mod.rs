//! HTTP route handlers for the JSON API.
//!
//! Routes are grouped by cacheability: predictions are never cached, while the
//! reference endpoints describe data that is fixed until restart.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod data_info;
pub mod health;
pub mod predict;
pub mod symptoms;

use std::any::Any;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use http::Method;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CorsConfig, CACHE_CONTROL_NO_STORE, CACHE_CONTROL_REFERENCE};
use crate::error::{AppError, ErrorBody};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Value of the `status` field in successful responses
pub const STATUS_SUCCESS: &str = "success";

/// Creates the Axum router with all routes, cache headers and CORS.
pub fn create_router(state: AppState) -> Router {
    // Predictions - random per call, never cache
    let predict_routes = Router::new()
        .route("/api/predict", post(predict::predict))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    // Reference data - fixed for the process lifetime
    let reference_routes = Router::new()
        .route("/api/data_info", get(data_info::data_info))
        .route("/api/symptoms", get(symptoms::symptoms))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_REFERENCE),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(predict_routes)
        .merge(reference_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        // Turn handler panics into the JSON 500 envelope
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// CORS for browser front ends. An empty origin list allows any origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(cors::Any);

    match config.origin_values() {
        Ok(origins) if origins.is_empty() => layer.allow_origin(cors::Any),
        Ok(origins) => layer.allow_origin(AllowOrigin::list(origins)),
        Err(e) => {
            // Validated at config load, so only reachable with a hand-built config
            tracing::warn!(error = %e, "Rejecting all cross-origin requests");
            layer
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(message).into_response()
}
