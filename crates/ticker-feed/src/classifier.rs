//! Direction classification against the last displayed value.
//!
//! The classifier remembers the last raw value seen per (instrument, field)
//! and compares each new value against it. The remembered value is
//! overwritten on every call, whatever the outcome, so each classification
//! depends only on the previous raw value and the new one.

use std::collections::HashMap;
use ticker_core::{Direction, Instrument, PriceField};
use tracing::trace;

/// Classifies bid/ask changes per instrument.
#[derive(Debug, Clone, Default)]
pub struct DirectionClassifier {
    displayed: HashMap<(Instrument, PriceField), f64>,
}

impl DirectionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `value` against the previous value and record it as the new baseline.
    ///
    /// Returns `NoBaseline` the first time a field is seen. Comparison is on
    /// raw floats; two values that print identically at display precision
    /// can still classify as `Up` or `Down`.
    pub fn classify(&mut self, instrument: &Instrument, field: PriceField, value: f64) -> Direction {
        let previous = self.displayed.insert((instrument.clone(), field), value);
        let direction = Direction::between(previous, value);
        trace!(
            instrument = %instrument,
            %field,
            value,
            ?previous,
            %direction,
            "Classified price change"
        );
        direction
    }

    /// Last displayed value for a field, if any.
    pub fn baseline(&self, instrument: &Instrument, field: PriceField) -> Option<f64> {
        self.displayed.get(&(instrument.clone(), field)).copied()
    }

    /// Forget every baseline.
    pub fn reset(&mut self) {
        self.displayed.clear();
    }
}
