//! Error types for ticker-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid instrument symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Duplicate instrument: {0}")]
    DuplicateInstrument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
