use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the store, settings, and storage layers.
#[derive(Error, Debug)]
pub enum KakeiboError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid year-month `{0}` (use YYYY-MM)")]
    InvalidYearMonth(String),
    #[error("Invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Entry source failed: {0}")]
    Source(String),
}

pub type Result<T> = StdResult<T, KakeiboError>;

impl From<serde_json::Error> for KakeiboError {
    fn from(err: serde_json::Error) -> Self {
        KakeiboError::Parse(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] KakeiboError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
