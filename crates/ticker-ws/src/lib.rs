//! WebSocket transport for the quote ticker.
//!
//! Provides:
//! - Automatic reconnection with exponential backoff and jitter
//! - Lifecycle events mapped onto [`ticker_core::TransportEvent`]
//! - Cancellation-aware shutdown

pub mod connection;
pub mod error;

pub use connection::{backoff_delay, ConnectionConfig, ConnectionManager, WsEvent};
pub use error::{WsError, WsResult};
