//! Error types for fetch-events.

use thiserror::Error;

/// Errors that can occur while preparing or running a fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("skipping invalid extra calendar '{0}' (expected account:calendarId)")]
    InvalidExtraCalendar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fetch-events operations.
pub type FetchResult<T> = Result<T, FetchError>;
