//! Streaming quote ticker.
//!
//! Wires the WebSocket transport into the ticker engine and applies every
//! resulting render patch to the configured renderers:
//! - Structured log renderer (always on)
//! - Web dashboard (optional)

pub mod app;
pub mod config;
pub mod error;
pub mod log_sink;

pub use app::Application;
pub use config::{AppConfig, TelemetryConfig, DEFAULT_CONFIG_PATH};
pub use error::{AppError, AppResult};
pub use log_sink::LogSink;
