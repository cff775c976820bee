//! placement - rule-based profiling and placement prediction for student records
//!
//! A validated dataset is projected into a fact base that named profile
//! rules are evaluated against, and a random forest trained on the same
//! records scores new students.
//!
//! Layers, bottom up:
//! - `records`: dataset schema, validation, loading
//! - `facts` and `rules`: fact base and the profile catalog
//! - `query`: profile queries over the fact base
//! - `encoding`, `model`, `prediction`: features, classifier, scoring
//! - `search`, `stats`: column filters and descriptive statistics
//! - `context`: everything above wired together for one dataset
//! - `api`, `cli`: JSON requests and the `placement` binary

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod encoding;
pub mod facts;
pub mod model;
pub mod observability;
pub mod prediction;
pub mod query;
pub mod records;
pub mod rules;
pub mod search;
pub mod stats;
