//! ticker-dashboard - live web feed of the ticker's display state.
//!
//! Browser renderers attach over WebSocket, receive the full table once and
//! then apply every render patch the engine emits.
//!
//! # Architecture
//!
//! ```text
//!  TickerEngine ──RenderPatch──▶ DashboardState (RenderSink)
//!                                  ├─ snapshot copy (RwLock)
//!                                  └─ broadcast::Sender<String>
//!                                             │
//!  axum HTTP Server                           ▼
//!   GET /api/snapshot → JSON RenderSnapshot
//!   GET /metrics      → Prometheus text
//!   GET /ws           → {"type":"snapshot"} then {"type":"patch"}…
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ticker_dashboard::{run_server, DashboardConfig, DashboardState};
//!
//! let config = DashboardConfig::default();
//! let state = DashboardState::new(engine.snapshot(), config.broadcast_capacity);
//! tokio::spawn(run_server(state.clone(), config, shutdown.clone()));
//! // feed every engine patch into `state` via RenderSink::apply
//! ```

mod config;
mod error;
mod server;
mod state;
mod types;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use server::{create_router, run_server, AppState, ConnectionGuard, ConnectionLimiter};
pub use state::DashboardState;
pub use types::DashboardMessage;
