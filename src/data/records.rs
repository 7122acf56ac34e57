//! Typed views over the raw tables.
//!
//! Each view is keyed by a trimmed disease or symptom name. Numbered repeated
//! columns (`Precaution_1..4`, `Medication_1..5`, ...) become a fixed array of
//! optional slots so lookups never go through column names at request time.

use std::collections::HashMap;

use crate::selector::PresenceVector;

use super::table::{cell, Table};

/// Key column shared by all disease-keyed tables
const DISEASE_COLUMN: &str = "Disease";

/// Key column of the severity and symptom tables
const SYMPTOM_COLUMN: &str = "Symptom";

/// Disease → description, plus the distinct disease labels in file order.
#[derive(Debug, Clone, Default)]
pub struct DescriptionTable {
    descriptions: HashMap<String, Option<String>>,
    labels: Vec<String>,
}

impl DescriptionTable {
    pub fn from_table(table: &Table) -> Self {
        let mut view = Self::default();
        let Some(key) = table.column_index_ignore_case(DISEASE_COLUMN) else {
            tracing::warn!("Description table has no Disease column");
            return view;
        };
        let value = table.column_index_ignore_case("Description");

        for row in table.rows() {
            let Some(disease) = cell(row, key) else {
                continue;
            };
            if view.descriptions.contains_key(disease) {
                continue;
            }
            let description = value.and_then(|i| cell(row, i)).map(str::to_string);
            view.descriptions.insert(disease.to_string(), description);
            view.labels.push(disease.to_string());
        }
        view
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.descriptions.contains_key(disease)
    }

    pub fn description(&self, disease: &str) -> Option<&str> {
        self.descriptions.get(disease)?.as_deref()
    }

    /// Distinct disease labels, in the order they first appear.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Disease → up to `N` optional values from `<prefix>_1..N` columns.
#[derive(Debug, Clone)]
pub struct SlotTable<const N: usize> {
    rows: HashMap<String, [Option<String>; N]>,
}

impl<const N: usize> Default for SlotTable<N> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<const N: usize> SlotTable<N> {
    /// Build from a table with columns `<prefix>_1` through `<prefix>_N`.
    ///
    /// Missing numbered columns leave that slot empty in every row. Only the
    /// first row for a disease is kept.
    pub fn from_table(table: &Table, prefix: &str) -> Self {
        let mut view = Self::default();
        let Some(key) = table.column_index_ignore_case(DISEASE_COLUMN) else {
            tracing::warn!(prefix, "Attribute table has no Disease column");
            return view;
        };
        let slot_columns: [Option<usize>; N] =
            std::array::from_fn(|i| table.column_index(&format!("{}_{}", prefix, i + 1)));

        for row in table.rows() {
            let Some(disease) = cell(row, key) else {
                continue;
            };
            view.rows.entry(disease.to_string()).or_insert_with(|| {
                std::array::from_fn(|i| {
                    slot_columns[i]
                        .and_then(|column| cell(row, column))
                        .map(str::to_string)
                })
            });
        }
        view
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.rows.contains_key(disease)
    }

    pub fn slots(&self, disease: &str) -> Option<&[Option<String>; N]> {
        self.rows.get(disease)
    }

    /// Filled slots in index order. Empty when the disease has no row.
    pub fn values(&self, disease: &str) -> Vec<String> {
        self.slots(disease)
            .map(|slots| slots.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }
}

/// Symptom → severity weight.
#[derive(Debug, Clone, Default)]
pub struct SeverityTable {
    weights: HashMap<String, i64>,
}

impl SeverityTable {
    pub fn from_table(table: &Table) -> Self {
        let mut view = Self::default();
        let (Some(key), Some(weight)) = (
            table.column_index_ignore_case(SYMPTOM_COLUMN),
            table.column_index_ignore_case("weight"),
        ) else {
            tracing::warn!("Severity table needs Symptom and weight columns");
            return view;
        };

        for row in table.rows() {
            let (Some(symptom), Some(raw)) = (cell(row, key), cell(row, weight)) else {
                continue;
            };
            match raw.parse::<i64>() {
                Ok(value) => {
                    view.weights.entry(symptom.to_string()).or_insert(value);
                }
                Err(_) => {
                    tracing::debug!(symptom, weight = raw, "Skipping non-numeric severity weight");
                }
            }
        }
        view
    }

    pub fn weight(&self, symptom: &str) -> Option<i64> {
        self.weights.get(symptom).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Ordered set of known symptom names.
#[derive(Debug, Clone, Default)]
pub struct SymptomVocabulary {
    symptoms: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Collect distinct values of the `Symptom` column and any numbered
    /// `Symptom_<i>` columns, in first-seen order.
    pub fn from_table(table: &Table) -> Self {
        let columns: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| is_symptom_column(name))
            .map(|(index, _)| index)
            .collect();

        if columns.is_empty() {
            tracing::warn!("Symptom table has no Symptom column");
        }

        let mut vocabulary = Self::default();
        for row in table.rows() {
            for &column in &columns {
                if let Some(symptom) = cell(row, column) {
                    vocabulary.insert(symptom);
                }
            }
        }
        vocabulary
    }

    fn insert(&mut self, symptom: &str) {
        if !self.index.contains_key(symptom) {
            self.index.insert(symptom.to_string(), self.symptoms.len());
            self.symptoms.push(symptom.to_string());
        }
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.index.contains_key(symptom)
    }

    /// Presence vector over this vocabulary. Unknown symptoms are ignored.
    pub fn presence<'a, I>(&self, symptoms: I) -> PresenceVector
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut present = vec![false; self.symptoms.len()];
        for symptom in symptoms {
            if let Some(&index) = self.index.get(symptom) {
                present[index] = true;
            }
        }
        PresenceVector::new(present)
    }
}

fn is_symptom_column(name: &str) -> bool {
    if name.eq_ignore_ascii_case(SYMPTOM_COLUMN) {
        return true;
    }
    match name.split_once('_') {
        Some((head, tail)) => {
            head.eq_ignore_ascii_case(SYMPTOM_COLUMN)
                && !tail.is_empty()
                && tail.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
