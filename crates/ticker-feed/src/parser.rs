//! Quote message parsing.
//!
//! Inbound payloads are JSON objects of the form
//! `{"symbol": "EURUSD", "bid": 1.085, "ask": 1.0852, "timestamp": 1700000000}`.
//! Numbers must be JSON numbers; string-encoded prices are rejected.
//! Additional fields are ignored.

use crate::error::{FeedError, FeedResult};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use ticker_core::{InstrumentSet, Quote};
use tracing::{debug, warn};

/// Counters for ingestion outcomes.
#[derive(Debug, Default)]
pub struct IngestStats {
    accepted_count: AtomicU64,
    parse_error_count: AtomicU64,
    unknown_instrument_count: AtomicU64,
}

impl IngestStats {
    pub fn record_accepted(&self) {
        self.accepted_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_parse_error(&self) {
        self.parse_error_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unknown_instrument(&self) {
        self.unknown_instrument_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn accepted(&self) -> u64 {
        self.accepted_count.load(Ordering::Relaxed)
    }

    pub fn parse_errors(&self) -> u64 {
        self.parse_error_count.load(Ordering::Relaxed)
    }

    pub fn unknown_instruments(&self) -> u64 {
        self.unknown_instrument_count.load(Ordering::Relaxed)
    }
}

/// Raw quote message from the transport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawQuote {
    pub symbol: String,
    pub bid: f64,
    pub ask: f64,
    /// Epoch seconds.
    pub timestamp: f64,
}

/// Parses inbound payloads and filters them against the configured instruments.
///
/// Ingestion is atomic: a rejected payload produces no quote and therefore
/// cannot reach any downstream state.
pub struct QuoteIngestor {
    instruments: InstrumentSet,
    stats: IngestStats,
}

impl QuoteIngestor {
    /// Create a new ingestor for a fixed instrument set.
    pub fn new(instruments: InstrumentSet) -> Self {
        Self {
            instruments,
            stats: IngestStats::default(),
        }
    }

    /// Configured instruments.
    pub fn instruments(&self) -> &InstrumentSet {
        &self.instruments
    }

    /// Ingestion statistics.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Parse a payload without applying the instrument filter.
    pub fn parse(&self, raw: &str) -> FeedResult<RawQuote> {
        if raw.trim().is_empty() {
            return Err(FeedError::ParseError("empty payload".to_string()));
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse and validate a payload.
    ///
    /// Returns `Ok(None)` when the payload is well-formed but names an
    /// instrument outside the configured set. That case is a relevance
    /// filter, not a failure.
    pub fn ingest(&self, raw: &str) -> FeedResult<Option<Quote>> {
        let parsed = match self.parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_parse_error();
                warn!(error = %e, payload_len = raw.len(), "Rejected malformed quote");
                return Err(e);
            }
        };

        let Some(instrument) = self.instruments.get(&parsed.symbol) else {
            self.stats.record_unknown_instrument();
            debug!(symbol = %parsed.symbol, "Dropped quote for unconfigured instrument");
            return Ok(None);
        };

        self.stats.record_accepted();
        Ok(Some(Quote::new(
            instrument.clone(),
            parsed.bid,
            parsed.ask,
            parsed.timestamp,
        )))
    }
}
