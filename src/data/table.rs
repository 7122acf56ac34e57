//! Raw CSV tables as loaded from disk.
//!
//! A `Table` keeps the header row and every data record as cells. Typed views
//! (see `records`) are derived from it; the raw form backs `/api/data_info`.

use std::io;
use std::path::Path;

use serde::Serialize;

use super::SourceError;

/// A parsed CSV source: header plus data records.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Row count and column names of a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: Vec<String>,
}

impl Table {
    /// Read a CSV file. The first record is the header.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        if !path.is_file() {
            return Err(SourceError::Missing(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse CSV from any reader. Rows may be shorter or longer than the header.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                if name.is_empty() {
                    format!("Unnamed: {}", index)
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column, ignoring ASCII case. Used for key columns whose
    /// capitalization differs between sources (`Disease` vs `disease`).
    pub fn column_index_ignore_case(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    pub fn info(&self) -> TableInfo {
        TableInfo {
            rows: self.rows.len(),
            columns: self.columns.clone(),
        }
    }
}

/// Cell value with surrounding whitespace removed, or `None` when blank or absent.
pub fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
