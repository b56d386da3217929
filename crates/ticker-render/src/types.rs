//! Render patch and snapshot types.
//!
//! These types are handed to renderers and serialized as JSON for remote ones.

use serde::Serialize;
use ticker_core::{ConnectionStatus, Direction, Instrument};

use crate::sparkline::Sparkline;

/// Minimal description of one quote update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotePatch {
    /// Instrument that changed.
    pub instrument: Instrument,
    /// New bid.
    pub bid: f64,
    /// New ask.
    pub ask: f64,
    /// Bid change vs previously displayed bid.
    pub bid_direction: Direction,
    /// Ask change vs previously displayed ask.
    pub ask_direction: Direction,
    /// Current bounded mid-price history, oldest first.
    pub sparkline_series: Vec<f64>,
    /// Source timestamp of the quote (epoch seconds).
    pub last_update_time: f64,
}

impl QuotePatch {
    /// Row flash cue for this update.
    ///
    /// A row reflects the last field that moved: the ask is applied after
    /// the bid, so an ask movement wins over a bid movement.
    pub fn row_pulse(&self) -> RowPulse {
        [self.ask_direction, self.bid_direction]
            .into_iter()
            .find_map(RowPulse::from_direction)
            .unwrap_or(RowPulse::Neutral)
    }

    /// Sparkline geometry for this update's series.
    pub fn sparkline(&self, capacity: usize) -> Option<Sparkline> {
        Sparkline::from_series(&self.sparkline_series, capacity)
    }
}

/// Row-level animation cue derived from field directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPulse {
    Up,
    Down,
    /// Update heartbeat without movement.
    Neutral,
}

impl RowPulse {
    fn from_direction(direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => Some(Self::Up),
            Direction::Down => Some(Self::Down),
            Direction::Unchanged | Direction::NoBaseline => None,
        }
    }
}

/// Targeted display update (tagged enum for renderers).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderPatch {
    /// One instrument's row changed.
    Quote(QuotePatch),
    /// Global connection status changed.
    Status { status: ConnectionStatus },
}

impl RenderPatch {
    /// Instrument touched by this patch, if any.
    pub fn instrument(&self) -> Option<&Instrument> {
        match self {
            Self::Quote(patch) => Some(&patch.instrument),
            Self::Status { .. } => None,
        }
    }
}

/// Display state of one instrument row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentView {
    pub instrument: Instrument,
    /// None until the first quote arrives.
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub bid_direction: Direction,
    pub ask_direction: Direction,
    pub sparkline_series: Vec<f64>,
    pub last_update_time: Option<f64>,
}

impl InstrumentView {
    /// Row for an instrument that has not been quoted yet.
    pub fn empty(instrument: Instrument) -> Self {
        Self {
            instrument,
            bid: None,
            ask: None,
            bid_direction: Direction::NoBaseline,
            ask_direction: Direction::NoBaseline,
            sparkline_series: Vec::new(),
            last_update_time: None,
        }
    }

    /// Apply a quote patch to this row.
    pub fn apply(&mut self, patch: &QuotePatch) {
        self.bid = Some(patch.bid);
        self.ask = Some(patch.ask);
        self.bid_direction = patch.bid_direction;
        self.ask_direction = patch.ask_direction;
        self.sparkline_series.clone_from(&patch.sparkline_series);
        self.last_update_time = Some(patch.last_update_time);
    }
}

/// Full display state (sent to a renderer when it attaches).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Global connection status.
    pub status: ConnectionStatus,
    /// Rows in configuration order.
    pub instruments: Vec<InstrumentView>,
}

impl RenderSnapshot {
    /// Get the row for an instrument.
    pub fn get(&self, instrument: &Instrument) -> Option<&InstrumentView> {
        self.instruments.iter().find(|v| &v.instrument == instrument)
    }

    /// Apply a patch to a snapshot copy.
    ///
    /// Lets a remote observer keep a current table from the patch stream.
    /// Patches for rows not in the snapshot are ignored.
    pub fn apply(&mut self, patch: &RenderPatch) {
        match patch {
            RenderPatch::Quote(quote) => {
                if let Some(view) = self
                    .instruments
                    .iter_mut()
                    .find(|v| v.instrument == quote.instrument)
                {
                    view.apply(quote);
                }
            }
            RenderPatch::Status { status } => self.status = *status,
        }
    }
}
