//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Instrument error: {0}")]
    Core(#[from] ticker_core::CoreError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] ticker_ws::WsError),

    #[error("Task failed: {0}")]
    Task(String),
}

pub type AppResult<T> = Result<T, AppError>;
