//! Analysis context
//!
//! Everything a session needs, built once at startup: the record store,
//! the fact store, the rule catalog and the trained model. The model is
//! trained once; `reload` only swaps records and facts.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::encoding::{transform, EncodingError, EncodingSet, FeatureLayout, RawAttributes};
use crate::facts::{FactBase, FactStore};
use crate::model::{train, FeatureWeight, ForestConfig, ModelError, TrainedModel};
use crate::observability::ObservationScope;
use crate::prediction::{PredictionError, PredictionService};
use crate::query::{ProfileMatch, ProfileQueryEngine, QueryError};
use crate::records::{RecordStore, SchemaError, StudentRecord, ValidationDetails};
use crate::rules::RuleCatalog;
use crate::search::{search, SearchError};
use crate::stats::{summarize, DatasetSummary};

/// Any failure surfaced through the context; codes pass through unchanged.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ContextError {
    pub fn code(&self) -> &'static str {
        match self {
            ContextError::Schema(e) => e.code().code(),
            ContextError::Query(e) => e.code().code(),
            ContextError::Encoding(e) => e.code(),
            ContextError::Model(e) => e.code(),
            ContextError::Prediction(e) => e.code(),
            ContextError::Search(e) => e.code(),
        }
    }

    /// Message without the severity/code prefix
    pub fn message(&self) -> String {
        match self {
            ContextError::Schema(e) => e.message().to_string(),
            ContextError::Query(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }
}

pub type ContextResult<T> = Result<T, ContextError>;

#[derive(Debug)]
pub struct AnalysisContext {
    run_id: Uuid,
    catalog: RuleCatalog,
    records: RecordStore,
    facts: FactStore,
    model: TrainedModel,
}

impl AnalysisContext {
    /// Builds facts, fits encoders and trains the model.
    ///
    /// # Errors
    ///
    /// `PLACEMENT_SCHEMA_VALIDATION_FAILED` if any record lacks a Placement
    /// label, plus any fact-building, encoding or training error.
    pub fn build(records: RecordStore, config: &ForestConfig) -> ContextResult<Self> {
        Self::with_catalog(records, RuleCatalog::standard(), config)
    }

    pub fn with_catalog(records: RecordStore, catalog: RuleCatalog, config: &ForestConfig) -> ContextResult<Self> {
        let run_id = Uuid::new_v4();
        let run = run_id.to_string();
        let scope = ObservationScope::with_fields("CONTEXT_BUILD", &[("run_id", run.as_str())]);

        let built = Self::build_parts(&records, config);
        let (facts, model) = match built {
            Ok(parts) => parts,
            Err(e) => {
                scope.fail(e.code(), &e.message());
                return Err(e);
            }
        };

        scope.complete_with_fields(&[("records", records.len().to_string().as_str())]);

        Ok(Self {
            run_id,
            catalog,
            records,
            facts,
            model,
        })
    }

    fn build_parts(records: &RecordStore, config: &ForestConfig) -> ContextResult<(FactStore, TrainedModel)> {
        let facts = FactStore::build(records)?;
        let labels = labels(records.records())?;

        let layout = FeatureLayout::standard();
        let encodings = EncodingSet::fit(records.records(), &layout.categorical())?;
        let matrix = transform(records.records(), &layout, &encodings)?;
        let model = train(&matrix, &labels, layout, encodings, config)?;

        Ok((facts, model))
    }

    /// Identifier of this process run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Current fact base snapshot
    pub fn facts(&self) -> Arc<FactBase> {
        self.facts.snapshot()
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn query_profile(&self, rule_name: &str) -> ContextResult<ProfileMatch> {
        let base = self.facts.snapshot();
        Ok(ProfileQueryEngine::new(&self.catalog).query_profile(&base, rule_name)?)
    }

    pub fn predict(&self, raw: &RawAttributes) -> ContextResult<f64> {
        Ok(PredictionService::new(&self.model).predict(raw)?)
    }

    /// Predicts from a JSON attribute object
    pub fn predict_json(&self, input: &Value) -> ContextResult<f64> {
        Ok(PredictionService::new(&self.model).predict_json(input)?)
    }

    pub fn search(&self, column: &str, op: &str, value: &str) -> ContextResult<Vec<usize>> {
        Ok(search(&self.records, column, op, value)?)
    }

    pub fn summary(&self) -> DatasetSummary {
        summarize(&self.records)
    }

    pub fn feature_importance(&self) -> Vec<FeatureWeight> {
        self.model.feature_importance()
    }

    pub fn oob_accuracy(&self) -> Option<f64> {
        self.model.oob_accuracy()
    }

    /// Replaces the records and rebuilds the fact base.
    ///
    /// The new base is built before anything is swapped, so on error the
    /// context is unchanged. Returns the new fact base generation.
    pub fn reload(&mut self, records: RecordStore) -> ContextResult<u64> {
        let base = self.facts.rebuild(&records)?;
        self.records = records;
        Ok(base.generation())
    }
}

/// Placement outcomes as booleans; every record must be labeled.
fn labels(records: &[StudentRecord]) -> ContextResult<Vec<bool>> {
    records
        .iter()
        .map(|r| match r.placement {
            Some(p) => Ok(p.is_yes()),
            None => Err(SchemaError::validation_failed(r.index, ValidationDetails::missing_field("Placement")).into()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::YesNo;

    fn record(index: usize, placed: bool) -> StudentRecord {
        StudentRecord {
            index,
            college_id: format!("CLG{:04}", index),
            iq: if placed { 115.0 } else { 90.0 },
            prev_sem_result: 7.0,
            cgpa: if placed { 9.2 } else { 5.5 },
            academic_performance: 6.0,
            internship_experience: if placed { YesNo::Yes } else { YesNo::No },
            extra_curricular_score: 5.0,
            communication_skills: 6.0,
            projects_completed: 3.0,
            placement: Some(if placed { YesNo::Yes } else { YesNo::No }),
        }
    }

    fn store(n: usize) -> RecordStore {
        RecordStore::from_records((0..n).map(|i| record(i, i % 2 == 0)).collect()).unwrap()
    }

    fn config() -> ForestConfig {
        ForestConfig {
            n_trees: 10,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_build_and_query() {
        let ctx = AnalysisContext::build(store(10), &config()).unwrap();
        let top = ctx.query_profile("candidato_academico_top").unwrap();
        assert_eq!(top.indices, vec![0, 2, 4, 6, 8]);
        let risk = ctx.query_profile("estudiante_en_riesgo").unwrap();
        assert_eq!(risk.indices, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_unlabeled_record_rejected() {
        let mut records: Vec<_> = (0..4).map(|i| record(i, i % 2 == 0)).collect();
        records[2].placement = None;
        let err = AnalysisContext::build(RecordStore::from_records(records).unwrap(), &config()).unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_SCHEMA_VALIDATION_FAILED");
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = AnalysisContext::build(RecordStore::default(), &config()).unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_EMPTY_DATASET");
    }

    #[test]
    fn test_reload_swaps_facts() {
        let mut ctx = AnalysisContext::build(store(6), &config()).unwrap();
        let before = ctx.facts();
        let generation = ctx.reload(store(4)).unwrap();

        assert_eq!(generation, before.generation() + 1);
        assert_eq!(before.len(), 6);
        assert_eq!(ctx.facts().len(), 4);
        assert_eq!(ctx.records().len(), 4);
        assert_eq!(ctx.query_profile("candidato_academico_top").unwrap().indices, vec![0, 2]);
    }

    #[test]
    fn test_unknown_rule_code_passes_through() {
        let ctx = AnalysisContext::build(store(4), &config()).unwrap();
        let err = ctx.query_profile("does_not_exist").unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_UNKNOWN_RULE");
        assert_eq!(err.message(), "Unknown profile rule 'does_not_exist'");
    }
}
