//! Bounded per-instrument mid-price history.
//!
//! Each instrument keeps a trailing window of at most `capacity` mid-prices,
//! oldest first. Appending past the bound evicts from the front (strict FIFO).

use crate::error::{FeedError, FeedResult};
use std::collections::{HashMap, VecDeque};
use ticker_core::{Instrument, InstrumentSet};
use tracing::trace;

/// Trailing window of mid-prices for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl PriceHistory {
    /// Create an empty history. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Most recently appended value.
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Copy of the window, oldest-first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// A trend line needs at least two points.
    pub fn has_trend(&self) -> bool {
        self.values.len() >= 2
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Price histories for every configured instrument.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    histories: HashMap<Instrument, PriceHistory>,
    capacity: usize,
}

impl HistoryStore {
    /// Create a store with an empty history per instrument.
    pub fn new(instruments: &InstrumentSet, capacity: usize) -> Self {
        let histories = instruments
            .iter()
            .map(|i| (i.clone(), PriceHistory::new(capacity)))
            .collect();
        Self {
            histories,
            capacity: capacity.max(1),
        }
    }

    /// Append a mid-price and return the updated window.
    ///
    /// The instrument must be one the store was created with.
    pub fn append(&mut self, instrument: &Instrument, mid_price: f64) -> FeedResult<&PriceHistory> {
        let history = self
            .histories
            .get_mut(instrument)
            .ok_or_else(|| FeedError::UnknownInstrument(instrument.to_string()))?;

        history.push(mid_price);
        trace!(
            instrument = %instrument,
            mid_price,
            len = history.len(),
            "History appended"
        );
        Ok(history)
    }

    /// Get the history for an instrument.
    pub fn get(&self, instrument: &Instrument) -> Option<&PriceHistory> {
        self.histories.get(instrument)
    }

    /// Per-instrument capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear every history. Not used during normal streaming.
    pub fn reset(&mut self) {
        for history in self.histories.values_mut() {
            history.clear();
        }
    }
}
