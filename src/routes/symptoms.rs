//! Handler for `GET /api/symptoms`.
//!
//! Lists the symptom vocabulary in its fixed order together with severity
//! weights, so clients can suggest valid symptom names.

use axum::{extract::State, Json};
use serde::Serialize;

use super::STATUS_SUCCESS;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SymptomEntry {
    pub name: String,
    /// Severity weight, `None` when the symptom has no severity row
    pub weight: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SymptomsResponse {
    pub status: &'static str,
    pub symptoms: Vec<SymptomEntry>,
}

pub async fn symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    let severity = state.store.severity();
    let symptoms = state
        .store
        .vocabulary()
        .symptoms()
        .iter()
        .map(|name| SymptomEntry {
            name: name.clone(),
            weight: severity.weight(name),
        })
        .collect();

    Json(SymptomsResponse {
        status: STATUS_SUCCESS,
        symptoms,
    })
}
