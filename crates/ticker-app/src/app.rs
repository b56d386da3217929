//! Main application logic.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::log_sink::LogSink;
use std::sync::Arc;
use ticker_core::{PriceField, TransportEvent};
use ticker_dashboard::{run_server, DashboardState};
use ticker_render::{dispatch, RenderPatch, RenderSink, TickerEngine};
use ticker_telemetry::Metrics;
use ticker_ws::{ConnectionManager, WsError, WsEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Transport events buffered between the socket task and the engine.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Main application.
pub struct Application {
    config: AppConfig,
    engine: TickerEngine,
    sinks: Vec<Box<dyn RenderSink>>,
    dashboard: Option<DashboardState>,
    shutdown: CancellationToken,
}

impl Application {
    /// Create a new application.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let instruments = config.instrument_set()?;
        let engine = TickerEngine::new(instruments, config.history_capacity);

        let mut sinks: Vec<Box<dyn RenderSink>> =
            vec![Box::new(LogSink::new(config.history_capacity))];

        let dashboard = config.dashboard.enabled.then(|| {
            let state = DashboardState::new(engine.snapshot(), config.dashboard.broadcast_capacity);
            sinks.push(Box::new(state.clone()));
            state
        });

        Ok(Self {
            config,
            engine,
            sinks,
            dashboard,
            shutdown: CancellationToken::new(),
        })
    }

    /// Register an additional renderer.
    pub fn add_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sinks.push(sink);
    }

    pub fn engine(&self) -> &TickerEngine {
        &self.engine
    }

    /// Token cancelled when the application stops.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run until ctrl-c, or until the transport gives up.
    pub async fn run(mut self) -> AppResult<()> {
        info!(
            instruments = ?self.engine.instruments().iter().map(|i| i.as_str()).collect::<Vec<_>>(),
            history_capacity = self.engine.history_capacity(),
            "Starting application"
        );
        Metrics::connection_status_set(self.engine.status());

        let (event_tx, mut event_rx) = mpsc::channel::<WsEvent>(EVENT_CHANNEL_CAPACITY);
        let connection_manager = Arc::new(ConnectionManager::new(
            self.config.websocket.clone(),
            event_tx,
        ));
        let connection_manager_clone = connection_manager.clone();
        let mut ws_handle = tokio::spawn(async move { connection_manager_clone.run().await });

        let dashboard_handle = self.dashboard.clone().map(|state| {
            let config = self.config.dashboard.clone();
            let shutdown = self.shutdown.clone();
            tokio::spawn(async move {
                if let Err(e) = run_server(state, config, shutdown).await {
                    error!(error = %e, "Dashboard server failed");
                }
            })
        });

        info!("Entering main event loop");
        let finished = loop {
            tokio::select! {
                Some(event) = event_rx.recv() => {
                    self.handle_event(event);
                }

                result = &mut ws_handle => {
                    warn!("Transport stopped");
                    // Apply what the transport reported before it exited.
                    while let Ok(event) = event_rx.try_recv() {
                        self.handle_event(event);
                    }
                    break Some(result);
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break None;
                }
            }
        };

        let stats = self.engine.stats();
        info!(
            accepted = stats.accepted(),
            parse_errors = stats.parse_errors(),
            unknown_instruments = stats.unknown_instruments(),
            "Shutting down"
        );

        connection_manager.shutdown();
        self.shutdown.cancel();
        // Unblocks a transport waiting on a full channel.
        drop(event_rx);

        if let Some(handle) = dashboard_handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Dashboard task join failed");
            }
        }

        let result = match finished {
            Some(result) => result,
            None => ws_handle.await,
        };
        match result {
            Ok(Ok(())) | Ok(Err(WsError::ReceiverDropped)) => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(e) => return Err(AppError::Task(e.to_string())),
        }

        Ok(())
    }

    /// Apply one transport event and fan the resulting patch out.
    pub fn handle_event(&mut self, event: WsEvent) -> Option<RenderPatch> {
        let patch = match event {
            WsEvent::Transport(TransportEvent::Message(raw)) => match self.engine.on_message(&raw) {
                Ok(Some(patch)) => Some(patch),
                Ok(None) => {
                    Metrics::unknown_instrument();
                    None
                }
                Err(e) => {
                    debug!(error = %e, "Payload dropped");
                    Metrics::parse_error();
                    None
                }
            },
            WsEvent::Transport(event) => self.engine.handle(event),
            WsEvent::Reconnecting { attempt, delay } => {
                debug!(attempt, delay_ms = delay.as_millis() as u64, "Transport reconnecting");
                Metrics::reconnect();
                self.engine.on_reconnecting()
            }
        }?;

        record_patch(&patch);
        dispatch(&mut self.sinks, &patch);
        Some(patch)
    }
}

fn record_patch(patch: &RenderPatch) {
    match patch {
        RenderPatch::Quote(quote) => {
            let instrument = quote.instrument.as_str();
            Metrics::quote_accepted(instrument);
            Metrics::direction(instrument, PriceField::Bid, quote.bid_direction);
            Metrics::direction(instrument, PriceField::Ask, quote.ask_direction);
        }
        RenderPatch::Status { status } => Metrics::connection_status_set(*status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_core::ConnectionStatus;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AppConfig {
            history_capacity: 1,
            ..AppConfig::default()
        };
        assert!(matches!(Application::new(config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_dashboard_sink_registered_when_enabled() {
        let mut config = AppConfig::default();
        config.dashboard.enabled = true;
        let app = Application::new(config).unwrap();
        assert_eq!(app.sinks.len(), 2);
        assert!(app.dashboard.is_some());

        let app = Application::new(AppConfig::default()).unwrap();
        assert_eq!(app.sinks.len(), 1);
    }

    #[test]
    fn test_reconnecting_event_moves_to_connecting() {
        let mut app = Application::new(AppConfig::default()).unwrap();
        app.handle_event(WsEvent::Transport(TransportEvent::Close));
        let patch = app.handle_event(WsEvent::Reconnecting {
            attempt: 1,
            delay: std::time::Duration::from_millis(1000),
        });
        assert_eq!(
            patch,
            Some(RenderPatch::Status {
                status: ConnectionStatus::Connecting
            })
        );
    }
}
