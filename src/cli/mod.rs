//! CLI for the placement analyzer
//!
//! Commands:
//! - rules: list the profile catalog
//! - profile / search / records / summary / importance / predict: boot, answer one request, exit
//! - serve: boot and answer JSON requests from stdin until EOF

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, one_shot, rules, run_command, serve, Session};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};

/// Parses arguments and runs the selected command.
///
/// On failure the error envelope is also written to stdout so every
/// command prints exactly one JSON object.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(cli.command);
    if let Err(e) = &result {
        let _ = write_error(e.code_str(), e.message());
    }
    result
}
