//! Read-only reference data loaded from CSV files at startup.
//!
//! Nine sources are read from a single directory by fixed file names. A source
//! that is missing or unreadable is logged and left out; the rest of the
//! service still starts. Nothing mutates the store after `load` returns.

mod records;
mod table;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use records::{DescriptionTable, SeverityTable, SlotTable, SymptomVocabulary};
pub use table::{Table, TableInfo};

use crate::config::{PRECAUTION_SLOTS, RECOMMENDATION_SLOTS};

pub const DESCRIPTION: &str = "description";
pub const DIETS: &str = "diets";
pub const MEDICAL_DATA: &str = "medical_data";
pub const MEDICATIONS: &str = "medications";
pub const PRECAUTIONS: &str = "precautions";
pub const SYMPTOM_SEVERITY: &str = "symptom_severity";
pub const SYMPTOMS: &str = "symptoms";
pub const TRAINING: &str = "training";
pub const WORKOUT: &str = "workout";

/// Table name and the file it is read from, relative to the data directory.
pub const SOURCES: [(&str, &str); 9] = [
    (DESCRIPTION, "description.csv"),
    (DIETS, "diets.csv"),
    (MEDICAL_DATA, "medical data.csv"),
    (MEDICATIONS, "medications.csv"),
    (PRECAUTIONS, "precautions_df.csv"),
    (SYMPTOM_SEVERITY, "Symptom-severity.csv"),
    (SYMPTOMS, "symtoms_df.csv"),
    (TRAINING, "Training.csv"),
    (WORKOUT, "workout_df.csv"),
];

/// Failure to read a single source. Never fatal for the store as a whole.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable in-memory reference tables.
#[derive(Debug, Default)]
pub struct DataStore {
    tables: BTreeMap<String, Table>,
    descriptions: DescriptionTable,
    precautions: SlotTable<PRECAUTION_SLOTS>,
    medications: SlotTable<RECOMMENDATION_SLOTS>,
    diets: SlotTable<RECOMMENDATION_SLOTS>,
    workouts: SlotTable<RECOMMENDATION_SLOTS>,
    severity: SeverityTable,
    vocabulary: SymptomVocabulary,
}

impl DataStore {
    /// Load every known source from `dir`, skipping the ones that fail.
    pub fn load(dir: &Path) -> Self {
        let mut tables = BTreeMap::new();

        for (name, file) in SOURCES {
            let path = dir.join(file);
            match Table::from_path(&path) {
                Ok(table) => {
                    tracing::info!(table = name, file, rows = table.len(), "Loaded table");
                    tables.insert(name.to_string(), table);
                }
                Err(SourceError::Missing(_)) => {
                    tracing::warn!(table = name, path = %path.display(), "File not found");
                }
                Err(e) => {
                    tracing::warn!(table = name, path = %path.display(), error = %e, "Error loading table");
                }
            }
        }

        Self::from_tables(tables)
    }

    /// Build the typed views from already-parsed tables keyed by table name.
    pub fn from_tables(tables: BTreeMap<String, Table>) -> Self {
        let empty = Table::default();
        let get = |name: &str| tables.get(name).unwrap_or(&empty);

        let descriptions = DescriptionTable::from_table(get(DESCRIPTION));
        let precautions = SlotTable::from_table(get(PRECAUTIONS), "Precaution");
        let medications = SlotTable::from_table(get(MEDICATIONS), "Medication");
        let diets = SlotTable::from_table(get(DIETS), "Diet");
        let workouts = SlotTable::from_table(get(WORKOUT), "Workout");
        let severity = SeverityTable::from_table(get(SYMPTOM_SEVERITY));
        let vocabulary = SymptomVocabulary::from_table(get(SYMPTOMS));

        Self {
            tables,
            descriptions,
            precautions,
            medications,
            diets,
            workouts,
            severity,
            vocabulary,
        }
    }

    /// Row count and columns of every table that loaded.
    pub fn table_info(&self) -> BTreeMap<String, TableInfo> {
        self.tables
            .iter()
            .map(|(name, table)| (name.clone(), table.info()))
            .collect()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn descriptions(&self) -> &DescriptionTable {
        &self.descriptions
    }

    pub fn precautions(&self) -> &SlotTable<PRECAUTION_SLOTS> {
        &self.precautions
    }

    pub fn medications(&self) -> &SlotTable<RECOMMENDATION_SLOTS> {
        &self.medications
    }

    pub fn diets(&self) -> &SlotTable<RECOMMENDATION_SLOTS> {
        &self.diets
    }

    pub fn workouts(&self) -> &SlotTable<RECOMMENDATION_SLOTS> {
        &self.workouts
    }

    pub fn severity(&self) -> &SeverityTable {
        &self.severity
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }
}
