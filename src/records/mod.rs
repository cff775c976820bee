//! Record Store for the placement dataset
//!
//! Rows are validated once at ingestion against a fixed schema, so every
//! downstream component can assume attribute presence and type.
//!
//! # Design Principles
//!
//! - Fixed record shape, no dynamic attribute lookup
//! - Records are addressed by index only; index equals position
//! - No nulls, defaults, or coercion
//! - Deterministic validation

mod errors;
mod loader;
mod store;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use loader::DatasetLoader;
pub use store::RecordStore;
pub use types::{Attribute, AttributeKind, StudentRecord, YesNo};
pub use validator::RecordValidator;
