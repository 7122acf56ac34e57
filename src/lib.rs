//! medlookup - symptom to disease lookup service
//!
//! Loads reference tables (descriptions, precautions, medications, diets,
//! workouts, symptom severity) from CSV files at startup and serves a small
//! JSON API that picks a disease for a list of symptoms and returns the
//! joined reference data for it.

pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod lookup;
pub mod middleware;
pub mod routes;
pub mod selector;
pub mod service;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
