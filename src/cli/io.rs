//! JSON I/O for the CLI
//!
//! - Input: JSON on stdin, one object per line
//! - Output: one JSON envelope per line on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Read, Write};

use serde_json::Value;

use crate::api::Response;

use super::errors::{CliError, CliResult};

/// Reads one JSON value from stdin. The whole input is consumed, so a
/// pretty-printed object spanning several lines is accepted.
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parses the body of a one-shot request
pub fn parse_request(input: &str) -> CliResult<Value> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(input)?)
}

/// Request lines from stdin; blank lines are skipped
pub fn read_requests() -> impl Iterator<Item = CliResult<String>> {
    io::stdin().lock().lines().filter_map(|line| match line {
        Ok(l) if l.trim().is_empty() => None,
        Ok(l) => Some(Ok(l)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Writes a success envelope to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&Response::success(data).to_json())
}

/// Writes an error envelope to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&response.to_string())
}

/// Writes one line of already serialized JSON to stdout
pub fn write_line(json: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
