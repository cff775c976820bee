//! Trained model: forest plus everything needed to score a raw candidate

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::encoding::{EncodingSet, FeatureLayout};
use crate::observability::{log_event_with_fields, Event, METRICS};

use super::errors::ModelResult;
use super::forest::{ForestConfig, RandomForest};

/// Diagnostics captured at training time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub n_trees: usize,
    pub seed: u64,
    pub samples: usize,
    pub features: usize,
    pub oob_accuracy: Option<f64>,
    pub trained_at: DateTime<Utc>,
}

/// One feature's share of the total impurity decrease
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
}

/// Read-only classifier state for one process run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForest,
    encodings: EncodingSet,
    layout: FeatureLayout,
    report: TrainingReport,
}

impl TrainedModel {
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Encodings fitted for the training features
    pub fn encodings(&self) -> &EncodingSet {
        &self.encodings
    }

    /// Feature columns in training order
    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn oob_accuracy(&self) -> Option<f64> {
        self.forest.oob_accuracy()
    }

    /// Importances keyed by column name, heaviest first.
    pub fn feature_importance(&self) -> Vec<FeatureWeight> {
        let mut weights: Vec<FeatureWeight> = self
            .layout
            .names()
            .into_iter()
            .zip(self.forest.importances())
            .map(|(name, &weight)| FeatureWeight {
                feature: name.to_string(),
                weight,
            })
            .collect();
        weights.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.feature.cmp(&b.feature)));
        weights
    }
}

/// Trains a forest on an encoded matrix and bundles it with its encodings.
///
/// `matrix` columns must follow `layout`.
pub fn train(
    matrix: &[Vec<f64>],
    labels: &[bool],
    layout: FeatureLayout,
    encodings: EncodingSet,
    config: &ForestConfig,
) -> ModelResult<TrainedModel> {
    let forest = RandomForest::fit(matrix, labels, config)?;

    let report = TrainingReport {
        n_trees: forest.n_trees(),
        seed: config.seed,
        samples: matrix.len(),
        features: forest.n_features(),
        oob_accuracy: forest.oob_accuracy(),
        trained_at: Utc::now(),
    };

    let oob = report.oob_accuracy.map_or_else(|| "n/a".to_string(), |a| format!("{:.4}", a));
    METRICS.increment_models_trained();
    log_event_with_fields(
        Event::ModelTrained,
        &[
            ("samples", report.samples.to_string().as_str()),
            ("trees", report.n_trees.to_string().as_str()),
            ("oob_accuracy", oob.as_str()),
        ],
    );

    Ok(TrainedModel {
        forest,
        encodings,
        layout,
        report,
    })
}

/// Probability of the positive class for an encoded row
pub fn predict_proba(model: &TrainedModel, row: &[f64]) -> ModelResult<f64> {
    model.forest.predict_proba(row)
}
