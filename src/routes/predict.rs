//! Handler for `POST /api/predict`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::STATUS_SUCCESS;
use crate::error::AppError;
use crate::service::{self, Prediction};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Comma-separated symptom names. Absent or null is treated as empty.
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub status: &'static str,
    pub result: Prediction,
}

/// Predicts a disease from the submitted symptoms and returns its reference data.
#[instrument(name = "api::predict", skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload?;
    let input = request.input.unwrap_or_default();

    let result = service::predict(&state.store, state.selector.as_ref(), &input)?;

    Ok(Json(PredictResponse {
        status: STATUS_SUCCESS,
        result,
    }))
}
