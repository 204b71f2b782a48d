use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a generation run.
///
/// Only the Fetch and Prepare phases produce these. Problems with a single
/// schema or operation are reported as [`crate::Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input location is neither a URL nor a readable path.
    #[error("invalid input location '{0}'")]
    InvalidInput(String),
    /// Transport-level failure while fetching the description.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
    /// The description is not valid JSON (or does not match the model).
    #[error("failed to parse API description: {0}")]
    ParseJson(#[from] serde_json::Error),
    /// The description is not valid YAML (or does not match the model).
    #[error("failed to parse API description: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    /// Filesystem failure outside the per-file Emit phase.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being done.
        action: &'static str,
        /// Affected path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GenerateError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for the expected keys.
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// A required setting was given neither on the command line nor in the file.
    #[error("missing required setting '{0}'")]
    Missing(&'static str),
}
