//! Error types used throughout the SDK

use thiserror::Error;

/// Main error type for the Applause reporter
#[derive(Error, Debug)]
pub enum ApplauseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Applause API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Applause reporter operations
pub type Result<T> = std::result::Result<T, ApplauseError>;
