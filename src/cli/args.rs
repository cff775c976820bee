//! CLI argument definitions using clap
//!
//! Commands:
//! - placement rules
//! - placement profile --config <path> --rule <key> [--preview N]
//! - placement search --config <path> --column <name> --op <op> --value <v>
//! - placement records --config <path> [--preview N]
//! - placement summary --config <path>
//! - placement importance --config <path>
//! - placement predict --config <path>
//! - placement serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Student placement analysis: rule-based profiles and placement prediction
#[derive(Parser, Debug)]
#[command(name = "placement")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the profile rules
    Rules,

    /// List the students matching a profile rule
    Profile {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Rule key, e.g. candidato_academico_top
        #[arg(long)]
        rule: String,

        /// Number of matching rows to include (defaults to preview_rows)
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Filter students on one column
    Search {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Column name as in the dataset, e.g. CGPA
        #[arg(long)]
        column: String,

        /// One of > < >= <= == !=
        #[arg(long, allow_hyphen_values = true)]
        op: String,

        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Show the dataset rows
    Records {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Number of rows to show (defaults to all)
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Descriptive statistics of the numeric columns
    Summary {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Feature importance of the trained model
    Importance {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Predict placement probability for one JSON attribute object on stdin
    Predict {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Answer JSON requests from stdin, one per line
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
