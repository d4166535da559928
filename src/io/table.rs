//! Tabular feature input.
//!
//! Feature and prediction files are headered CSV with one row per
//! (entity, as-of-date) and named numeric columns. Only column
//! presence and numeric parseability matter here: cells that fail to
//! parse as a finite `f64` are missing values and simply drop out of
//! that column's sample.

use std::path::Path;

use crate::error::{Result, VigilarError};

/// Named numeric columns read from a CSV file, in header order.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    columns: Vec<(String, Vec<f64>)>,
}

impl FeatureTable {
    /// Read a headered CSV file into named numeric columns.
    ///
    /// The whole file being unreadable or lacking a header row is an
    /// input error; individual bad cells are not.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| VigilarError::input_at(path, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| VigilarError::input_at(path, e.to_string()))?
            .clone();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(VigilarError::input_at(path, "empty file or missing header row"));
        }

        let mut columns: Vec<(String, Vec<f64>)> =
            headers.iter().map(|h| (h.trim().to_string(), Vec::new())).collect();

        for record in reader.records() {
            let record = record.map_err(|e| VigilarError::input_at(path, e.to_string()))?;
            for (i, cell) in record.iter().enumerate().take(columns.len()) {
                if let Ok(value) = cell.trim().parse::<f64>() {
                    if value.is_finite() {
                        columns[i].1.push(value);
                    }
                }
            }
        }

        Ok(Self { columns })
    }

    /// Column names in header order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// The parsed sample for a named column, if the column exists.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Whether the column exists in the header, regardless of sample size.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}
