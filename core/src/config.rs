//! Loading the results page configuration
//!
//! An explicit path is read as TOML and must parse. Without a path the
//! confy-managed file in the user's config directory is used, falling back
//! to defaults if it cannot be read.

use std::fs;
use std::path::{Path, PathBuf};

use baras_report_types::ReportConfig;

/// confy application name for the default config location
pub const CONFIG_APP_NAME: &str = "baras-report";

pub fn load_config(path: Option<&Path>) -> Result<ReportConfig, ConfigError> {
    match path {
        Some(path) => load_config_file(path),
        None => Ok(load_default_config()),
    }
}

/// Read a config file, every missing field taking its default
pub fn load_config_file(path: &Path) -> Result<ReportConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ReportConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn load_default_config() -> ReportConfig {
    match confy::load(CONFIG_APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            ReportConfig::default()
        }
    }
}

/// Errors that can occur during config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError { path, source } => {
                write!(f, "IO error reading {:?}: {}", path, source)
            }
            Self::ParseError { path, source } => {
                write!(f, "Parse error in {:?}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::ParseError { source, .. } => Some(source),
        }
    }
}
