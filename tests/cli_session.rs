//! CLI Session Tests
//!
//! Boot from a config file, then drive requests through the same handler
//! the `serve` loop uses.

use placement::api::{ProfileRequest, Request};
use placement::cli::boot;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn row(i: usize) -> Value {
    let placed = i % 3 != 0;
    json!({
        "College_ID": format!("CLG{:04}", i),
        "IQ": if placed { 112 } else { 90 },
        "Prev_Sem_Result": if placed { 8.1 } else { 5.2 },
        "CGPA": if placed { 8.4 } else { 5.6 },
        "Academic_Performance": if placed { 8 } else { 3 },
        "Internship_Experience": if placed { "Yes" } else { "No" },
        "Extra_Curricular_Score": 4,
        "Communication_Skills": 7,
        "Projects_Completed": 3,
        "Placement": if placed { "Yes" } else { "No" },
    })
}

fn setup(rows: usize) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let data: Vec<Value> = (0..rows).map(row).collect();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/students.json"), Value::Array(data).to_string()).unwrap();

    let config = dir.path().join("placement.json");
    fs::write(
        &config,
        r#"{"data_file": "data/students.json", "log_level": "warn", "forest": {"n_trees": 12}}"#,
    )
    .unwrap();
    (dir, config)
}

fn parse(line: &str) -> Value {
    serde_json::from_str(line).unwrap()
}

// =============================================================================
// Boot
// =============================================================================

/// A config with unknown keys is rejected at boot.
#[test]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("placement.json");
    fs::write(&config, r#"{"data_file": "x.json", "data_dir": "/tmp"}"#).unwrap();

    let err = boot(&config).err().unwrap();
    assert_eq!(err.code_str(), "PLACEMENT_CONFIG_INVALID");
}

/// A dataset with a malformed row fails boot with the schema code.
#[test]
fn test_schema_drift_fails_boot() {
    let (dir, config) = setup(6);
    let mut rows: Vec<Value> = (0..6).map(row).collect();
    rows[2]["CGPA"] = json!("high");
    fs::write(dir.path().join("data/students.json"), Value::Array(rows).to_string()).unwrap();

    let err = boot(&config).err().unwrap();
    assert_eq!(err.code_str(), "PLACEMENT_SCHEMA_VALIDATION_FAILED");
}

// =============================================================================
// Request Loop
// =============================================================================

/// Failing requests produce error envelopes and later requests still work.
#[test]
fn test_serve_loop_continues_after_errors() {
    let (_dir, config) = setup(15);
    let mut session = boot(&config).unwrap();
    let mut handler = session.handler();

    let lines = [
        r#"{"op": "profile", "rule": "does_not_exist"}"#,
        r#"not json"#,
        r#"{"op": "drop_table"}"#,
        r#"{"op": "predict", "attributes": {"CGPA": 8}}"#,
        r#"{"op": "summary"}"#,
        r#"{"op": "metrics"}"#,
    ];
    let responses: Vec<Value> = lines.iter().map(|l| parse(&handler.handle(l).to_json())).collect();

    assert_eq!(responses[0]["code"], "PLACEMENT_UNKNOWN_RULE");
    assert_eq!(responses[1]["code"], "PLACEMENT_INVALID_REQUEST");
    assert_eq!(responses[2]["code"], "PLACEMENT_UNKNOWN_OPERATION");
    assert_eq!(responses[3]["code"], "PLACEMENT_MISSING_FEATURE");
    assert_eq!(responses[4]["status"], "ok");
    assert_eq!(responses[4]["data"]["records"], 15);
    assert_eq!(responses[4]["data"]["outcomes"]["placed"], 10);
    assert_eq!(responses[5]["status"], "ok");
}

/// One-shot execution returns the profile for the booted dataset.
#[test]
fn test_execute_profile() {
    let (_dir, config) = setup(9);
    let mut session = boot(&config).unwrap();

    let data = session
        .execute(Request::Profile(ProfileRequest {
            rule: "riesgo_desmotivacion".into(),
            preview: Some(1),
        }))
        .unwrap();

    // Not-placed rows: prev 5.2 < 7, so none match
    assert_eq!(data["count"], 0);

    let risk = session
        .execute(Request::Profile(ProfileRequest {
            rule: "estudiante_en_riesgo".into(),
            preview: Some(1),
        }))
        .unwrap();
    assert_eq!(risk["indices"], json!([0, 3, 6]));
    assert_eq!(risk["preview"][0]["College_ID"], "CLG0000");
}
