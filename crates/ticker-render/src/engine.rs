//! Ticker engine.
//!
//! Single owner of all mutable ticker state. Transport events are applied
//! one at a time, in arrival order, and each yields at most one patch.

use crate::builder::RenderStateBuilder;
use crate::types::{RenderPatch, RenderSnapshot};
use ticker_core::{ConnectionStatus, InstrumentSet, TransportEvent};
use ticker_feed::{ConnectionStateMachine, FeedResult, IngestStats, QuoteIngestor};

pub struct TickerEngine {
    connection: ConnectionStateMachine,
    ingestor: QuoteIngestor,
    builder: RenderStateBuilder,
}

impl TickerEngine {
    pub fn new(instruments: InstrumentSet, history_capacity: usize) -> Self {
        let builder = RenderStateBuilder::new(&instruments, history_capacity);
        Self {
            connection: ConnectionStateMachine::new(),
            ingestor: QuoteIngestor::new(instruments),
            builder,
        }
    }

    /// Apply one transport event.
    ///
    /// Malformed payloads are logged and counted by the ingestor and
    /// produce no patch.
    pub fn handle(&mut self, event: TransportEvent) -> Option<RenderPatch> {
        match event {
            TransportEvent::Open => self.on_open(),
            TransportEvent::Close => self.on_close(),
            TransportEvent::Error(reason) => self.on_error(&reason),
            TransportEvent::Message(raw) => self.on_message(&raw).unwrap_or(None),
        }
    }

    pub fn on_open(&mut self) -> Option<RenderPatch> {
        let status = self.connection.on_open()?;
        Some(self.builder.on_status_change(status))
    }

    pub fn on_close(&mut self) -> Option<RenderPatch> {
        let status = self.connection.on_close()?;
        Some(self.builder.on_status_change(status))
    }

    pub fn on_error(&mut self, reason: &str) -> Option<RenderPatch> {
        let status = self.connection.on_error(reason)?;
        Some(self.builder.on_status_change(status))
    }

    /// The transport is retrying after a drop.
    pub fn on_reconnecting(&mut self) -> Option<RenderPatch> {
        let status = self.connection.on_reconnecting()?;
        Some(self.builder.on_status_change(status))
    }

    /// Ingest a payload.
    ///
    /// `Ok(None)` means the payload was valid but for an unconfigured
    /// instrument.
    pub fn on_message(&mut self, raw: &str) -> FeedResult<Option<RenderPatch>> {
        let Some(quote) = self.ingestor.ingest(raw)? else {
            return Ok(None);
        };
        self.builder.on_quote(&quote).map(Some)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection.current_status()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.builder.snapshot()
    }

    pub fn stats(&self) -> &IngestStats {
        self.ingestor.stats()
    }

    pub fn instruments(&self) -> &InstrumentSet {
        self.ingestor.instruments()
    }

    pub fn history_capacity(&self) -> usize {
        self.builder.history_capacity()
    }

    /// Read access to the render state (history windows, baselines).
    pub fn state(&self) -> &RenderStateBuilder {
        &self.builder
    }
}
