//! Render state builder.
//!
//! Folds quotes and status changes into display state and emits a patch
//! describing exactly what changed.

use crate::types::{InstrumentView, QuotePatch, RenderPatch, RenderSnapshot};
use std::collections::HashMap;
use ticker_core::{ConnectionStatus, Instrument, InstrumentSet, PriceField, Quote};
use ticker_feed::{DirectionClassifier, FeedResult, HistoryStore, PriceHistory};
use tracing::trace;

/// Owns history, direction baselines and per-row display state.
pub struct RenderStateBuilder {
    instruments: InstrumentSet,
    history: HistoryStore,
    classifier: DirectionClassifier,
    views: HashMap<Instrument, InstrumentView>,
    status: ConnectionStatus,
}

impl RenderStateBuilder {
    /// Create a builder with one empty row per configured instrument.
    pub fn new(instruments: &InstrumentSet, history_capacity: usize) -> Self {
        let views = instruments
            .iter()
            .map(|i| (i.clone(), InstrumentView::empty(i.clone())))
            .collect();
        Self {
            instruments: instruments.clone(),
            history: HistoryStore::new(instruments, history_capacity),
            classifier: DirectionClassifier::new(),
            views,
            status: ConnectionStatus::default(),
        }
    }

    /// Apply a validated quote.
    ///
    /// History is appended before any direction is classified, so a quote
    /// rejected by the store leaves every baseline untouched.
    pub fn on_quote(&mut self, quote: &Quote) -> FeedResult<RenderPatch> {
        let series = self
            .history
            .append(&quote.instrument, quote.mid_price())?
            .to_vec();

        let bid_direction = self
            .classifier
            .classify(&quote.instrument, PriceField::Bid, quote.bid);
        let ask_direction = self
            .classifier
            .classify(&quote.instrument, PriceField::Ask, quote.ask);

        let patch = QuotePatch {
            instrument: quote.instrument.clone(),
            bid: quote.bid,
            ask: quote.ask,
            bid_direction,
            ask_direction,
            sparkline_series: series,
            last_update_time: quote.timestamp,
        };

        self.views
            .entry(quote.instrument.clone())
            .or_insert_with(|| InstrumentView::empty(quote.instrument.clone()))
            .apply(&patch);

        trace!(
            instrument = %patch.instrument,
            bid_direction = %bid_direction,
            ask_direction = %ask_direction,
            "Quote patch built"
        );

        Ok(RenderPatch::Quote(patch))
    }

    /// Record a connection status change.
    pub fn on_status_change(&mut self, status: ConnectionStatus) -> RenderPatch {
        self.status = status;
        RenderPatch::Status { status }
    }

    /// Full display state in configuration order.
    pub fn snapshot(&self) -> RenderSnapshot {
        let instruments = self
            .instruments
            .iter()
            .map(|i| {
                self.views
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| InstrumentView::empty(i.clone()))
            })
            .collect();
        RenderSnapshot {
            status: self.status,
            instruments,
        }
    }

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Mid-price window for an instrument.
    pub fn history(&self, instrument: &Instrument) -> Option<&PriceHistory> {
        self.history.get(instrument)
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn instruments(&self) -> &InstrumentSet {
        &self.instruments
    }
}
