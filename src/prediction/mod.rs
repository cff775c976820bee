//! Prediction Service
//!
//! Validates a raw candidate, encodes it with the frozen encodings and
//! delegates to the classifier. Side-effect free apart from logging.

mod errors;
mod service;

pub use errors::{PredictionError, PredictionResult};
pub use service::{parse_attributes, predict, PredictionService};
