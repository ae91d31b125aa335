//! Environment loading error types.

use thiserror::Error;

/// Error raised while building or publishing an environment record.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("failed to read environment file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse environment yaml: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse environment json: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unknown deployment target: {0}")]
    UnknownTarget(String),
    #[error("active environment is already initialized")]
    AlreadyInitialized,
}
