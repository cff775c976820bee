//! Request dispatch over an analysis context
//!
//! Every request yields exactly one response. Component errors become
//! error responses with their original code; nothing here ends the session.

use std::path::PathBuf;

use serde_json::{json, Value};

use crate::context::AnalysisContext;
use crate::observability::{log_event_with_fields, Event, METRICS};
use crate::records::DatasetLoader;
use crate::rules::RuleCatalog;

use super::errors::{ApiError, ApiResult};
use super::request::{ProfileRequest, Request, SearchRequest};
use super::response::Response;

pub struct ApiHandler<'a> {
    context: &'a mut AnalysisContext,
    /// Dataset re-read by `reload`
    data_path: PathBuf,
    preview_rows: usize,
}

impl<'a> ApiHandler<'a> {
    pub fn new(context: &'a mut AnalysisContext, data_path: impl Into<PathBuf>, preview_rows: usize) -> Self {
        Self {
            context,
            data_path: data_path.into(),
            preview_rows,
        }
    }

    pub fn context(&self) -> &AnalysisContext {
        self.context
    }

    /// Handles one raw JSON request line
    pub fn handle(&mut self, json_request: &str) -> Response {
        let result = Request::parse(json_request).and_then(|request| self.dispatch(request));

        match result {
            Ok(data) => Response::success(data),
            Err(e) => {
                log_event_with_fields(Event::RequestRejected, &[("code", e.code()), ("reason", e.message())]);
                Response::error(&e)
            }
        }
    }

    /// Executes an already parsed request
    pub fn dispatch(&mut self, request: Request) -> ApiResult<Value> {
        match request {
            Request::Profile(r) => self.handle_profile(r),
            Request::Predict(attributes) => self.handle_predict(&attributes),
            Request::Search(r) => self.handle_search(r),
            Request::Records { preview } => Ok(records_data(self.context, preview)),
            Request::Summary => to_value(&self.context.summary()),
            Request::Importance => Ok(importance_data(self.context)),
            Request::Rules => Ok(rules_data(self.context.catalog())),
            Request::Reload => self.handle_reload(),
            Request::Metrics => to_value(&METRICS.snapshot()),
        }
    }

    fn handle_profile(&self, req: ProfileRequest) -> ApiResult<Value> {
        Ok(profile_data(self.context, &req.rule, req.preview.unwrap_or(self.preview_rows))?)
    }

    fn handle_predict(&self, attributes: &Value) -> ApiResult<Value> {
        let probability = self.context.predict_json(attributes)?;
        Ok(json!({ "probability": probability }))
    }

    fn handle_search(&self, req: SearchRequest) -> ApiResult<Value> {
        let indices = self.context.search(&req.column, &req.op, &req.value)?;
        Ok(json!({
            "column": req.column,
            "operator": req.op,
            "value": req.value,
            "count": indices.len(),
            "indices": indices,
        }))
    }

    fn handle_reload(&mut self) -> ApiResult<Value> {
        let records = DatasetLoader::load(&self.data_path).map_err(ApiError::from_schema_error)?;
        let count = records.len();
        let generation = self.context.reload(records)?;
        Ok(json!({ "records": count, "generation": generation }))
    }
}

/// Profile result with matching indices and a record preview
pub fn profile_data(
    context: &AnalysisContext,
    rule: &str,
    preview: usize,
) -> Result<Value, crate::context::ContextError> {
    let matched = context.query_profile(rule)?;
    let title = context.catalog().get(rule).map(|r| r.title().to_string());
    let rows = matched.preview(context.records(), preview);

    Ok(json!({
        "rule": matched.rule,
        "title": title,
        "count": matched.len(),
        "scanned": matched.scanned_count,
        "generation": matched.generation,
        "indices": matched.indices,
        "preview": rows,
    }))
}

/// The first `preview` rows in index order, or all of them
pub fn records_data(context: &AnalysisContext, preview: Option<usize>) -> Value {
    let records = context.records().records();
    let shown = &records[..preview.map_or(records.len(), |n| n.min(records.len()))];
    json!({
        "count": records.len(),
        "shown": shown.len(),
        "records": shown,
    })
}

/// Importance weights, heaviest first, plus the OOB score
pub fn importance_data(context: &AnalysisContext) -> Value {
    json!({
        "features": context.feature_importance(),
        "oob_accuracy": context.oob_accuracy(),
        "training": context.model().report(),
    })
}

/// The rule catalog as name, title, condition triples
pub fn rules_data(catalog: &RuleCatalog) -> Value {
    let rules: Vec<Value> = catalog
        .rules()
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "title": r.title(),
                "condition": r.condition().to_string(),
            })
        })
        .collect();
    Value::Array(rules)
}

fn to_value<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::serialization_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForestConfig;
    use crate::records::{RecordStore, StudentRecord, YesNo};

    fn record(index: usize, placed: bool) -> StudentRecord {
        StudentRecord {
            index,
            college_id: format!("CLG{:04}", index),
            iq: if placed { 120.0 } else { 95.0 },
            prev_sem_result: 8.0,
            cgpa: if placed { 9.4 } else { 5.8 },
            academic_performance: 7.0,
            internship_experience: if placed { YesNo::Yes } else { YesNo::No },
            extra_curricular_score: 4.0,
            communication_skills: 6.0,
            projects_completed: 2.0,
            placement: Some(if placed { YesNo::Yes } else { YesNo::No }),
        }
    }

    fn context() -> AnalysisContext {
        let store = RecordStore::from_records((0..12).map(|i| record(i, i < 6)).collect()).unwrap();
        let config = ForestConfig {
            n_trees: 10,
            ..ForestConfig::default()
        };
        AnalysisContext::build(store, &config).unwrap()
    }

    fn parse(resp: &Response) -> Value {
        serde_json::from_str(&resp.to_json()).unwrap()
    }

    #[test]
    fn test_profile_request() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "unused.json", 2);
        let resp = parse(&handler.handle(r#"{"op": "profile", "rule": "candidato_academico_top"}"#));

        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["data"]["count"], 6);
        assert_eq!(resp["data"]["title"], "Top academic");
        assert_eq!(resp["data"]["preview"].as_array().unwrap().len(), 2);
        assert_eq!(resp["data"]["preview"][0]["College_ID"], "CLG0000");
    }

    #[test]
    fn test_error_does_not_stop_handler() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "unused.json", 5);

        let bad = parse(&handler.handle(r#"{"op": "profile", "rule": "does_not_exist"}"#));
        assert_eq!(bad["code"], "PLACEMENT_UNKNOWN_RULE");

        let good = parse(&handler.handle(r#"{"op": "search", "column": "CGPA", "operator": "<", "value": 6}"#));
        assert_eq!(good["data"]["indices"], json!([6, 7, 8, 9, 10, 11]));
    }

    #[test]
    fn test_predict_request() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "unused.json", 5);
        let resp = parse(&handler.handle(
            r#"{"op": "predict", "attributes": {"IQ": 120, "Prev_Sem_Result": 8, "CGPA": 9.4,
                "Academic_Performance": 7, "Internship_Experience": "yes",
                "Extra_Curricular_Score": 4, "Communication_Skills": 6, "Projects_Completed": 2}}"#,
        ));
        assert!(resp["data"]["probability"].as_f64().unwrap() > 0.5);

        let missing = parse(&handler.handle(r#"{"op": "predict", "attributes": {"CGPA": 9.4}}"#));
        assert_eq!(missing["code"], "PLACEMENT_MISSING_FEATURE");
    }

    #[test]
    fn test_rules_and_importance() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "unused.json", 5);
        let rules = parse(&handler.handle(r#"{"op": "rules"}"#));
        assert_eq!(rules["data"].as_array().unwrap().len(), 9);

        let importance = parse(&handler.handle(r#"{"op": "importance"}"#));
        let total: f64 = importance["data"]["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["weight"].as_f64().unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_records_request() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "unused.json", 5);

        let some = parse(&handler.handle(r#"{"op": "records", "preview": 3}"#));
        assert_eq!(some["data"]["count"], 12);
        assert_eq!(some["data"]["shown"], 3);
        assert_eq!(some["data"]["records"][2]["College_ID"], "CLG0002");

        let all = parse(&handler.handle(r#"{"op": "records", "preview": 500}"#));
        assert_eq!(all["data"]["records"].as_array().unwrap().len(), 12);

        let default = parse(&handler.handle(r#"{"op": "records"}"#));
        assert_eq!(default["data"]["shown"], 12);
    }

    #[test]
    fn test_to_value_reports_serialization_failure() {
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8], 1u8);
        let err = to_value(&bad).unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_SERIALIZATION_FAILED");
    }

    #[test]
    fn test_reload_missing_file_keeps_context() {
        let mut ctx = context();
        let mut handler = ApiHandler::new(&mut ctx, "/nonexistent/students.json", 5);
        let resp = parse(&handler.handle(r#"{"op": "reload"}"#));
        assert_eq!(resp["code"], "PLACEMENT_DATASET_UNREADABLE");
        assert_eq!(handler.context().records().len(), 12);
    }
}
