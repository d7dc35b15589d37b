//! Error types
//!
//! Each collaborator boundary gets its own error enum. History errors never
//! leave the history module; display errors decide the process exit code.

use thiserror::Error;

/// Failures while talking to the review history service.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("request to review service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("review service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode review response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("review service reported an error: {0}")]
    Api(String),

    #[error("review response has no result list")]
    MissingResult,
}

/// Failures of the pixel matrix collaborator.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to initialise display: {0}")]
    Init(String),

    #[error("display I/O failed: {0}")]
    Io(String),

    #[error("display is already open in this process")]
    Busy,
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err.to_string())
    }
}

/// Invalid configuration values picked up from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}'")]
    Parse { key: &'static str, value: String },

    #[error("{key}: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}
