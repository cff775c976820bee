//! Configuration file
//!
//! JSON, default path `./placement.json`. Only `data_file` is required;
//! relative paths resolve against the config file's directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::ForestConfig;
use crate::observability::Severity;

pub const DEFAULT_CONFIG_PATH: &str = "./placement.json";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Malformed(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Unreadable { .. } => "PLACEMENT_CONFIG_UNREADABLE",
            ConfigError::Malformed(_) | ConfigError::Invalid(_) => "PLACEMENT_CONFIG_INVALID",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset JSON file (required)
    pub data_file: PathBuf,

    /// Minimum log level (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rows shown by `profile` previews (default 5)
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default)]
    pub forest: ForestConfig,

    /// Directory of the config file; set by `load`
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_preview_rows() -> usize {
    5
}

impl Config {
    /// Config with defaults for everything except the dataset path
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            log_level: default_log_level(),
            preview_rows: default_preview_rows(),
            forest: ForestConfig::default(),
            base_dir: None,
        }
    }

    /// Loads and validates a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses and validates config text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_file must not be empty".into()));
        }
        if self.preview_rows == 0 {
            return Err(ConfigError::Invalid("preview_rows must be > 0".into()));
        }
        self.severity()?;
        self.forest.validate().map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }

    /// Dataset path, resolved against the config file's directory
    pub fn data_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) if self.data_file.is_relative() => dir.join(&self.data_file),
            _ => self.data_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MaxFeatures;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::parse(r#"{"data_file": "students.json"}"#).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.forest.n_trees, 100);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.forest.max_features, MaxFeatures::Sqrt);
        assert_eq!(config.forest.max_depth, None);
    }

    #[test]
    fn test_partial_forest_section() {
        let config = Config::parse(r#"{"data_file": "s.json", "forest": {"n_trees": 10, "max_features": "all"}}"#).unwrap();
        assert_eq!(config.forest.n_trees, 10);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.forest.max_features, MaxFeatures::All);
    }

    #[test]
    fn test_missing_data_file() {
        assert!(matches!(Config::parse("{}"), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_validation() {
        for bad in [
            r#"{"data_file": "s.json", "forest": {"n_trees": 0}}"#,
            r#"{"data_file": "s.json", "forest": {"min_samples_split": 1}}"#,
            r#"{"data_file": "s.json", "forest": {"min_samples_leaf": 0}}"#,
            r#"{"data_file": "s.json", "preview_rows": 0}"#,
            r#"{"data_file": "s.json", "log_level": "loud"}"#,
        ] {
            let err = Config::parse(bad).unwrap_err();
            assert_eq!(err.code(), "PLACEMENT_CONFIG_INVALID", "{}", bad);
        }
    }

    #[test]
    fn test_data_path_relative_to_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("placement.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"data_file": "students.json"}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_path(), dir.path().join("students.json"));
    }

    #[test]
    fn test_unreadable() {
        let err = Config::load(Path::new("/nonexistent/placement.json")).unwrap_err();
        assert_eq!(err.code(), "PLACEMENT_CONFIG_UNREADABLE");
    }
}
