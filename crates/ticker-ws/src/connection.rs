//! WebSocket connection manager.
//!
//! Connects to the quote source, forwards every text frame as a
//! [`TransportEvent::Message`], and reconnects with exponential backoff when
//! the connection drops.

use crate::error::{WsError, WsResult};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use ticker_core::TransportEvent;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async_tls_with_config, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// WebSocket URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum reconnection attempts (0 = infinite).
    #[serde(default)]
    pub max_reconnect_attempts: u32,
    /// Base delay for exponential backoff.
    #[serde(default = "default_base_delay_ms")]
    pub reconnect_base_delay_ms: u64,
    /// Maximum delay for exponential backoff.
    #[serde(default = "default_max_delay_ms")]
    pub reconnect_max_delay_ms: u64,
}

fn default_url() -> String {
    "ws://localhost:9002".to_string()
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_reconnect_attempts: 0,
            reconnect_base_delay_ms: default_base_delay_ms(),
            reconnect_max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Event emitted by the connection manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    /// Lifecycle or payload event from the socket.
    Transport(TransportEvent),
    /// A reconnect attempt is scheduled after `delay`.
    Reconnecting { attempt: u32, delay: Duration },
}

/// WebSocket connection manager.
pub struct ConnectionManager {
    config: ConnectionConfig,
    event_tx: mpsc::Sender<WsEvent>,
    reconnect_count: Arc<RwLock<u32>>,
    /// Cancellation token for graceful shutdown.
    shutdown_token: CancellationToken,
}

impl ConnectionManager {
    /// Create a new connection manager.
    pub fn new(config: ConnectionConfig, event_tx: mpsc::Sender<WsEvent>) -> Self {
        Self {
            config,
            event_tx,
            reconnect_count: Arc::new(RwLock::new(0)),
            shutdown_token: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Consecutive failed attempts since the last successful open.
    pub fn reconnect_count(&self) -> u32 {
        *self.reconnect_count.read()
    }

    /// Signal graceful shutdown.
    ///
    /// Cancels the shutdown token, which makes both the message loop and the
    /// reconnect loop exit promptly.
    pub fn shutdown(&self) {
        info!("ConnectionManager shutdown requested");
        self.shutdown_token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Token that is cancelled on shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Connect and run until shutdown or the retry budget is exhausted.
    pub async fn run(&self) -> WsResult<()> {
        loop {
            if self.is_shutdown() {
                info!("Shutdown requested, exiting connect loop");
                return Ok(());
            }

            let event = match self.try_connect().await {
                Ok(()) => {
                    info!("WebSocket connection closed");
                    TransportEvent::Close
                }
                Err(WsError::ReceiverDropped) => {
                    warn!("Event receiver dropped, stopping transport");
                    return Err(WsError::ReceiverDropped);
                }
                Err(e) => {
                    error!(error = %e, "WebSocket connection error");
                    TransportEvent::Error(e.to_string())
                }
            };

            if self.is_shutdown() {
                info!("Shutdown requested after disconnect, not reconnecting");
                return Ok(());
            }
            self.emit(WsEvent::Transport(event)).await?;

            let attempt = *self.reconnect_count.read() + 1;
            *self.reconnect_count.write() = attempt;

            if self.config.max_reconnect_attempts > 0
                && attempt >= self.config.max_reconnect_attempts
            {
                error!(attempt, "Max reconnection attempts reached");
                return Err(WsError::ConnectionFailed(
                    "Max reconnection attempts reached".to_string(),
                ));
            }

            let delay = self.calculate_backoff_delay(attempt);
            warn!(attempt, delay_ms = delay.as_millis() as u64, "Reconnecting");
            self.emit(WsEvent::Reconnecting { attempt, delay }).await?;

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown requested during backoff, exiting");
                    return Ok(());
                }
            }
        }
    }

    async fn try_connect(&self) -> WsResult<()> {
        info!(url = %self.config.url, "Connecting to WebSocket");

        let connect = connect_async_tls_with_config(&self.config.url, None, true, None);
        let (ws_stream, _response) = tokio::select! {
            result = connect => result?,
            () = self.shutdown_token.cancelled() => return Ok(()),
        };
        let (mut write, mut read) = ws_stream.split();

        *self.reconnect_count.write() = 0;
        info!("WebSocket connected");
        self.emit(WsEvent::Transport(TransportEvent::Open)).await?;

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown signal received in message loop");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        warn!(error = %e, "Failed to send Close frame during shutdown");
                    }
                    return Ok(());
                }

                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.emit(WsEvent::Transport(TransportEvent::Message(text))).await?;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            match String::from_utf8(data.to_vec()) {
                                Ok(text) => {
                                    self.emit(WsEvent::Transport(TransportEvent::Message(text))).await?;
                                }
                                Err(_) => debug!(len = data.len(), "Ignoring non-UTF-8 binary frame"),
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!("Received ping, sending pong");
                            write.send(Message::Pong(data)).await?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason): (u16, String) = frame
                                .map(|f| (f.code.into(), f.reason.to_string()))
                                .unwrap_or((1000, "Normal close".to_string()));
                            info!(code, %reason, "WebSocket closed by server");
                            return Ok(());
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket read error");
                            return Err(e.into());
                        }
                        None => {
                            warn!("WebSocket stream ended");
                            return Ok(());
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    async fn emit(&self, event: WsEvent) -> WsResult<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| WsError::ReceiverDropped)
    }

    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        backoff_delay(
            attempt,
            self.config.reconnect_base_delay_ms,
            self.config.reconnect_max_delay_ms,
        ) + Duration::from_millis(rand_jitter())
    }
}

/// Exponential backoff without jitter: `base * 2^(attempt-1)`, capped at `max`.
pub fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    let delay = base_ms.saturating_mul(1u64 << exponent);
    Duration::from_millis(delay.min(max_ms))
}

/// Generate random jitter (0-1000ms).
fn rand_jitter() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos % 1000) as u64
}
