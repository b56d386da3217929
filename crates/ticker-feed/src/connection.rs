//! Transport lifecycle state machine.
//!
//! ```text
//!   Connecting ──open──▶ Connected ──close/error──▶ Disconnected
//!        ▲                                              │
//!        └──────────────── reconnecting ────────────────┘
//! ```
//!
//! Every transition is total: any event is accepted in any state. Reconnect
//! policy belongs to the transport; this machine only records what the
//! transport reports. Leaving `Disconnected` (reconnecting, or an open on a
//! retried socket) happens only when the transport drives it.

use ticker_core::ConnectionStatus;
use tracing::{info, warn};

/// Tracks the transport's current lifecycle status.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStateMachine {
    status: ConnectionStatus,
}

impl ConnectionStateMachine {
    /// Start in `Connecting`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn current_status(&self) -> ConnectionStatus {
        self.status
    }

    /// Transport opened.
    ///
    /// Returns the new status if it changed.
    pub fn on_open(&mut self) -> Option<ConnectionStatus> {
        self.transition(ConnectionStatus::Connected)
    }

    /// Transport closed.
    pub fn on_close(&mut self) -> Option<ConnectionStatus> {
        self.transition(ConnectionStatus::Disconnected)
    }

    /// Transport failed. Treated exactly like a close.
    pub fn on_error(&mut self, reason: &str) -> Option<ConnectionStatus> {
        warn!(%reason, "Transport error");
        self.transition(ConnectionStatus::Disconnected)
    }

    /// Transport is retrying the connection.
    pub fn on_reconnecting(&mut self) -> Option<ConnectionStatus> {
        self.transition(ConnectionStatus::Connecting)
    }

    fn transition(&mut self, next: ConnectionStatus) -> Option<ConnectionStatus> {
        if self.status == next {
            return None;
        }
        info!(from = %self.status, to = %next, "Connection status changed");
        self.status = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_connecting() {
        let machine = ConnectionStateMachine::new();
        assert_eq!(machine.current_status(), ConnectionStatus::Connecting);
    }

    #[test]
    fn test_open_then_close() {
        let mut machine = ConnectionStateMachine::new();
        assert_eq!(machine.on_open(), Some(ConnectionStatus::Connected));
        assert_eq!(machine.current_status(), ConnectionStatus::Connected);
        assert_eq!(machine.on_close(), Some(ConnectionStatus::Disconnected));
        assert_eq!(machine.current_status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_error_disconnects() {
        let mut machine = ConnectionStateMachine::new();
        machine.on_open();
        assert_eq!(
            machine.on_error("connection reset"),
            Some(ConnectionStatus::Disconnected)
        );
    }

    #[test]
    fn test_close_before_open_disconnects() {
        let mut machine = ConnectionStateMachine::new();
        assert_eq!(machine.on_close(), Some(ConnectionStatus::Disconnected));
    }

    #[test]
    fn test_repeated_event_reports_no_change() {
        let mut machine = ConnectionStateMachine::new();
        machine.on_close();
        assert_eq!(machine.on_close(), None);
        assert_eq!(machine.on_error("again"), None);
        assert_eq!(machine.current_status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_reconnect_cycle() {
        let mut machine = ConnectionStateMachine::new();
        machine.on_open();
        machine.on_close();
        assert_eq!(machine.on_reconnecting(), Some(ConnectionStatus::Connecting));
        assert_eq!(machine.on_open(), Some(ConnectionStatus::Connected));
    }

    #[test]
    fn test_open_from_disconnected_reconnects() {
        let mut machine = ConnectionStateMachine::new();
        machine.on_close();
        assert_eq!(machine.on_open(), Some(ConnectionStatus::Connected));
    }
}
