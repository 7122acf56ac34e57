//! Joins the attribute tables for one disease label.

use serde::Serialize;

use crate::data::DataStore;

/// Everything known about a disease across the five attribute tables.
///
/// Attributes from tables with no matching row are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiseaseInfo {
    pub description: Option<String>,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workouts: Vec<String>,
}

/// Look up a disease. `None` when it matches no row in any attribute table.
pub fn lookup(store: &DataStore, disease: &str) -> Option<DiseaseInfo> {
    let known = store.descriptions().contains(disease)
        || store.precautions().contains(disease)
        || store.medications().contains(disease)
        || store.diets().contains(disease)
        || store.workouts().contains(disease);
    if !known {
        return None;
    }

    Some(DiseaseInfo {
        description: store.descriptions().description(disease).map(str::to_string),
        precautions: store.precautions().values(disease),
        medications: store.medications().values(disease),
        diet: store.diets().values(disease),
        workouts: store.workouts().values(disease),
    })
}
