//! Raw candidate → probability

use serde_json::Value;

use crate::encoding::{transform_row, EncodingSet, RawAttributes, RawValue};
use crate::model::{predict_proba, TrainedModel};
use crate::observability::{log_event_with_fields, Event, METRICS};
use crate::records::Attribute;

use super::errors::{PredictionError, PredictionResult};

/// Scores one raw attribute set.
///
/// Every expected feature must be present; all missing names are reported
/// together. Extra keys are ignored.
pub fn predict(model: &TrainedModel, encodings: &EncodingSet, raw: &RawAttributes) -> PredictionResult<f64> {
    let missing: Vec<String> = model
        .layout()
        .names()
        .into_iter()
        .filter(|name| !raw.contains_key(*name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(PredictionError::MissingFeature { features: missing });
    }

    let row = transform_row(raw, model.layout(), encodings)?;
    Ok(predict_proba(model, &row)?)
}

/// Prediction front end bound to one trained model
#[derive(Debug, Clone, Copy)]
pub struct PredictionService<'a> {
    model: &'a TrainedModel,
}

impl<'a> PredictionService<'a> {
    pub fn new(model: &'a TrainedModel) -> Self {
        Self { model }
    }

    /// Scores `raw` with the model's own encodings.
    pub fn predict(&self, raw: &RawAttributes) -> PredictionResult<f64> {
        let outcome = predict(self.model, self.model.encodings(), raw);
        match &outcome {
            Ok(p) => {
                METRICS.increment_predictions_served();
                log_event_with_fields(Event::PredictionServed, &[("probability", format!("{:.4}", p).as_str())]);
            }
            Err(e) => {
                METRICS.increment_predictions_rejected();
                log_event_with_fields(Event::PredictionRejected, &[("code", e.code()), ("reason", e.to_string().as_str())]);
            }
        }
        outcome
    }

    /// Scores a JSON object of column → value.
    pub fn predict_json(&self, input: &Value) -> PredictionResult<f64> {
        let raw = parse_attributes(input)?;
        self.predict(&raw)
    }
}

/// Converts a JSON object into raw attributes.
///
/// Keys that are not dataset columns are dropped. A known column whose
/// value is neither a number nor a string is rejected.
pub fn parse_attributes(input: &Value) -> PredictionResult<RawAttributes> {
    let object = input
        .as_object()
        .ok_or_else(|| PredictionError::InvalidInput("expected a JSON object of attributes".into()))?;

    let mut raw = RawAttributes::new();
    for (key, value) in object {
        if Attribute::from_column(key).is_none() {
            continue;
        }
        let parsed: RawValue = serde_json::from_value(value.clone())
            .map_err(|_| PredictionError::InvalidInput(format!("attribute {} must be a number or string", key)))?;
        raw.insert(key.clone(), parsed);
    }
    Ok(raw)
}
