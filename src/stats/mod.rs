//! Column Summary
//!
//! Descriptive statistics over the numeric columns and placement outcome
//! counts.

mod summary;

pub use summary::{summarize, summarize_column, ColumnSummary, DatasetSummary, OutcomeCounts};
