//! CLI command implementations
//!
//! Every command except `rules` boots the same way: load config, apply the
//! log level, load the dataset, build the analysis context. One-shot
//! commands dispatch a single request; `serve` loops until stdin closes.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::api::{rules_data, ApiHandler, ProfileRequest, Request, SearchRequest};
use crate::config::Config;
use crate::context::AnalysisContext;
use crate::observability::{log_event_with_fields, set_min_severity, Event};
use crate::records::DatasetLoader;
use crate::rules::RuleCatalog;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_line, write_response};

/// A booted configuration and its analysis context
pub struct Session {
    config: Config,
    context: AnalysisContext,
}

impl Session {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }

    /// Handler over this session's context
    pub fn handler(&mut self) -> ApiHandler<'_> {
        ApiHandler::new(&mut self.context, self.config.data_path(), self.config.preview_rows)
    }

    /// Dispatches one request, keeping the failing component's code
    pub fn execute(&mut self, request: Request) -> CliResult<Value> {
        self.handler().dispatch(request).map_err(|e| {
            log_event_with_fields(Event::RequestRejected, &[("code", e.code()), ("reason", e.message())]);
            CliError::from(e)
        })
    }
}

/// Execute a CLI command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Rules => rules(),
        Command::Profile { config, rule, preview } => one_shot(&config, Request::Profile(ProfileRequest { rule, preview })),
        Command::Search {
            config,
            column,
            op,
            value,
        } => one_shot(&config, Request::Search(SearchRequest { column, op, value })),
        Command::Records { config, preview } => one_shot(&config, Request::Records { preview }),
        Command::Summary { config } => one_shot(&config, Request::Summary),
        Command::Importance { config } => one_shot(&config, Request::Importance),
        Command::Predict { config } => {
            let attributes = read_request()?;
            one_shot(&config, Request::Predict(attributes))
        }
        Command::Serve { config } => serve(&config),
    }
}

/// Lists the profile catalog. Needs no dataset.
pub fn rules() -> CliResult<()> {
    write_response(rules_data(&RuleCatalog::standard()))
}

/// Boot, run one request, print its envelope
pub fn one_shot(config_path: &Path, request: Request) -> CliResult<()> {
    let mut session = boot(config_path)?;
    let data = session.execute(request)?;
    write_response(data)
}

/// Boot, then answer stdin requests line by line until EOF.
///
/// A failing request yields an error envelope and the loop continues.
/// Only an I/O failure on stdin or stdout ends the loop early.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let mut session = boot(config_path)?;
    let run_id = session.context().run_id().to_string();
    log_event_with_fields(Event::Serving, &[("run_id", run_id.as_str())]);

    let mut handler = session.handler();
    let mut served: u64 = 0;
    let mut outcome = Ok(());

    for line in read_requests() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                outcome = Err(e);
                break;
            }
        };

        let response = handler.handle(&line);
        served += 1;
        if let Err(e) = write_line(&response.to_json()) {
            outcome = Err(e);
            break;
        }
    }

    log_event_with_fields(
        Event::ServingStopped,
        &[("run_id", run_id.as_str()), ("requests", served.to_string().as_str())],
    );
    outcome
}

/// Loads config and dataset and builds the analysis context
pub fn boot(config_path: &Path) -> CliResult<Session> {
    let path = config_path.display().to_string();
    log_event_with_fields(Event::BootStart, &[("config", path.as_str())]);

    match boot_inner(config_path) {
        Ok(session) => {
            let run_id = session.context.run_id().to_string();
            log_event_with_fields(
                Event::BootComplete,
                &[
                    ("run_id", run_id.as_str()),
                    ("records", session.context.records().len().to_string().as_str()),
                ],
            );
            Ok(session)
        }
        Err(e) => {
            log_event_with_fields(Event::BootFailed, &[("code", e.code_str()), ("reason", e.message())]);
            Err(e)
        }
    }
}

fn boot_inner(config_path: &Path) -> CliResult<Session> {
    let config = Config::load(config_path)?;
    set_min_severity(config.severity()?);

    let data_path: PathBuf = config.data_path();
    let data_display = data_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_file", data_display.as_str()), ("log_level", config.log_level.as_str())],
    );

    let records = DatasetLoader::load(&data_path)?;
    let context = AnalysisContext::build(records, &config.forest)?;

    Ok(Session { config, context })
}
