//! Application configuration.
//!
//! Configuration is a single TOML file. Lookup order:
//! 1. Explicit `--config` path (must exist)
//! 2. `casestack.toml` in the working directory, if present
//! 3. Built-in defaults
//!
//! Unknown keys are rejected so typos fail loudly instead of silently
//! falling back to defaults.

use std::path::{Path, PathBuf};

use cs_chart::ChartConfig;
use cs_common::SortOrder;
use cs_stack::ValueMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "casestack.toml";

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    /// Config parsed but the values are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    /// Bin ordering in summaries (descending matches the chart axis).
    pub order: SortOrder,
}

/// Settings for stack computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Default value mode for the overview.
    pub mode: ValueMode,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Default data file, overridable with `--data`.
    pub data: Option<PathBuf>,
    pub stats: StatsConfig,
    pub stack: StackConfig,
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Check cross-field validity after parsing.
    pub fn validate(&self) -> Result<()> {
        self.chart
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Load configuration, following the lookup order above.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let config: AppConfig =
                toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            debug!(path = %path.display(), "configuration loaded");
            config
        }
        None => {
            debug!("no config file found, using defaults");
            AppConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stats.order, SortOrder::Descending);
        assert_eq!(config.stack.mode, ValueMode::Fraction);
        assert_eq!(config.chart.width, 1000);
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "data = \"cases.csv\"\n[stats]\norder = \"ascending\"\n[chart]\nwidth = 800"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data, Some(PathBuf::from("cases.csv")));
        assert_eq!(config.stats.order, SortOrder::Ascending);
        assert_eq!(config.chart.width, 800);
        // Untouched sections keep their defaults.
        assert_eq!(config.chart.height, 600);
        assert_eq!(config.stack.mode, ValueMode::Fraction);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dataa = \"typo.csv\"").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nwidth = 10").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/casestack.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
