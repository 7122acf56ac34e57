//! Prediction pipeline: parse symptoms, select a disease, join its data.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::DESCRIPTION_NOT_AVAILABLE;
use crate::data::DataStore;
use crate::error::AppError;
use crate::lookup::lookup;
use crate::selector::Selector;

/// Result record returned by `/api/predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub disease: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workouts: Vec<String>,
}

/// Split a comma-separated symptom list into distinct trimmed names.
pub fn parse_symptoms(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|symptom| !symptom.is_empty())
        .map(str::to_string)
        .collect()
}

/// Predict a disease from a comma-separated symptom list and attach its data.
pub fn predict(
    store: &DataStore,
    selector: &dyn Selector,
    input: &str,
) -> Result<Prediction, AppError> {
    let symptoms = parse_symptoms(input);
    let presence = store
        .vocabulary()
        .presence(symptoms.iter().map(String::as_str));

    tracing::debug!(
        symptoms = symptoms.len(),
        recognized = presence.count(),
        vocabulary = presence.len(),
        selector = selector.name(),
        "Selecting disease"
    );

    let disease = selector
        .select(&presence)
        .ok_or(AppError::PredictionUnavailable)?;
    let info = lookup(store, &disease).ok_or_else(|| AppError::DiseaseNotFound(disease.clone()))?;

    tracing::info!(disease = %disease, "Predicted disease");

    Ok(Prediction {
        disease,
        description: info
            .description
            .unwrap_or_else(|| DESCRIPTION_NOT_AVAILABLE.to_string()),
        precautions: info.precautions,
        medications: info.medications,
        diet: info.diet,
        workouts: info.workouts,
    })
}
