//! Dashboard state.
//!
//! Holds a copy of the engine's render snapshot, kept current by applying
//! every published patch, plus the broadcast channel that fans patches out to
//! connected clients. Readers never touch engine state.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use ticker_render::{RenderPatch, RenderSink, RenderSnapshot};

use crate::types::DashboardMessage;

/// Shared dashboard state (cheap to clone).
#[derive(Clone)]
pub struct DashboardState {
    snapshot: Arc<RwLock<RenderSnapshot>>,
    broadcast_tx: broadcast::Sender<String>,
}

impl DashboardState {
    /// Create state seeded with the engine's current snapshot.
    pub fn new(initial: RenderSnapshot, broadcast_capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(broadcast_capacity.max(1));
        Self {
            snapshot: Arc::new(RwLock::new(initial)),
            broadcast_tx,
        }
    }

    /// Current display state.
    pub fn collect_snapshot(&self) -> RenderSnapshot {
        self.snapshot.read().clone()
    }

    /// Subscribe to patches and capture the snapshot they apply on top of.
    ///
    /// Both happen under the read lock, and `publish` applies and sends under
    /// the write lock, so the receiver sees exactly the patches that came
    /// after the returned snapshot.
    pub fn subscribe(&self) -> (RenderSnapshot, broadcast::Receiver<String>) {
        let guard = self.snapshot.read();
        let rx = self.broadcast_tx.subscribe();
        ((*guard).clone(), rx)
    }

    /// Apply a patch to the shared snapshot and broadcast it.
    pub fn publish(&self, patch: &RenderPatch) {
        let json = match serde_json::to_string(&DashboardMessage::patch(patch.clone())) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "Failed to serialize dashboard patch");
                return;
            }
        };

        let mut snapshot = self.snapshot.write();
        snapshot.apply(patch);
        match self.broadcast_tx.send(json) {
            Ok(n) => trace!(receivers = n, "Dashboard patch sent"),
            Err(_) => trace!("No dashboard receivers connected"),
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.broadcast_tx.receiver_count()
    }
}

impl RenderSink for DashboardState {
    fn apply(&mut self, patch: &RenderPatch) {
        self.publish(patch);
    }
}
