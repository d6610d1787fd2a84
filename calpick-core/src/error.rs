//! Error types for calpick.

use thiserror::Error;

/// Errors that can occur in calpick operations.
///
/// The state machine itself never fails; these come from locale lookup,
/// configuration and the event store.
#[derive(Error, Debug)]
pub enum CalPickError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported locale: {0}")]
    Locale(String),

    #[error("Could not format date: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Picker is already active")]
    AlreadyActive,

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for calpick operations.
pub type CalPickResult<T> = Result<T, CalPickError>;
