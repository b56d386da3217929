//! Dashboard wire types.

use serde::Serialize;
use ticker_render::{RenderPatch, RenderSnapshot};

/// WebSocket message types (tagged enum for type safety).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardMessage {
    /// Full table (sent on connect).
    Snapshot {
        /// Send time (Unix milliseconds).
        timestamp_ms: i64,
        snapshot: RenderSnapshot,
    },
    /// One incremental change.
    Patch { timestamp_ms: i64, patch: RenderPatch },
}

impl DashboardMessage {
    pub fn snapshot(snapshot: RenderSnapshot) -> Self {
        Self::Snapshot {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            snapshot,
        }
    }

    pub fn patch(patch: RenderPatch) -> Self {
        Self::Patch {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            patch,
        }
    }
}
