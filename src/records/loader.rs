//! Dataset loader
//!
//! A dataset file is a JSON array of row objects keyed by column name.
//! Converting the original CSV export into this form happens upstream.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event, METRICS};

use super::errors::{SchemaError, SchemaResult};
use super::store::RecordStore;

/// Reads dataset files into a validated `RecordStore`.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads and validates every row of the dataset at `path`.
    ///
    /// # Errors
    ///
    /// - `PLACEMENT_DATASET_UNREADABLE` if the file cannot be read or is not
    ///   a JSON array
    /// - `PLACEMENT_SCHEMA_VALIDATION_FAILED` for the first invalid row
    pub fn load(path: &Path) -> SchemaResult<RecordStore> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::dataset_unreadable(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let store = Self::parse_from(&content, &path.display().to_string())?;

        METRICS.add_records_loaded(store.len() as u64);
        log_event_with_fields(
            Event::DatasetLoaded,
            &[
                ("path", path.display().to_string().as_str()),
                ("records", store.len().to_string().as_str()),
                ("labeled", store.labeled_count().to_string().as_str()),
            ],
        );
        Ok(store)
    }

    /// Parses dataset text already in memory.
    pub fn parse(content: &str) -> SchemaResult<RecordStore> {
        Self::parse_from(content, "<memory>")
    }

    fn parse_from(content: &str, source: &str) -> SchemaResult<RecordStore> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SchemaError::dataset_unreadable(source, format!("Invalid JSON: {}", e)))?;

        let rows = value
            .as_array()
            .ok_or_else(|| SchemaError::dataset_unreadable(source, "expected a JSON array of rows"))?;

        RecordStore::from_rows(rows)
    }
}
