//! Common data types for quotes and transport state.

use crate::instrument::Instrument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bid/ask observation for one instrument.
///
/// Quotes are transient: they are consumed to derive history and display
/// state and are not retained afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument this quote belongs to.
    pub instrument: Instrument,
    /// Best bid price.
    pub bid: f64,
    /// Best ask price.
    pub ask: f64,
    /// Source timestamp in epoch seconds.
    pub timestamp: f64,
}

impl Quote {
    /// Create a new quote.
    pub fn new(instrument: Instrument, bid: f64, ask: f64, timestamp: f64) -> Self {
        Self {
            instrument,
            bid,
            ask,
            timestamp,
        }
    }

    /// Calculate mid price: (bid + ask) / 2.
    pub fn mid_price(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Get the value of one side of the quote.
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Bid => self.bid,
            PriceField::Ask => self.ask,
        }
    }

    /// Source timestamp as a UTC datetime.
    ///
    /// Returns None when the timestamp is outside chrono's representable range.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        epoch_seconds_to_utc(self.timestamp)
    }
}

/// Convert fractional epoch seconds to a UTC datetime.
pub fn epoch_seconds_to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Quote side tracked for direction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Bid,
    Ask,
}

impl PriceField {
    /// Both fields, in the order a quote row is updated.
    pub const ALL: [PriceField; 2] = [PriceField::Bid, PriceField::Ask];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change of a field relative to the previously displayed value.
///
/// `NoBaseline` means no value has been displayed yet for the field. It must
/// be rendered neutrally and is distinct from `Unchanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Unchanged,
    NoBaseline,
}

impl Direction {
    /// Compare a new raw value against the previous one.
    ///
    /// Strict float comparison; no tolerance is applied.
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        match previous {
            None => Self::NoBaseline,
            Some(prev) if current > prev => Self::Up,
            Some(prev) if current < prev => Self::Down,
            Some(_) => Self::Unchanged,
        }
    }

    /// True for `Up` and `Down`.
    pub fn is_movement(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unchanged => "unchanged",
            Self::NoBaseline => "no_baseline",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport lifecycle as seen by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub const ALL: [ConnectionStatus; 3] = [
        ConnectionStatus::Connecting,
        ConnectionStatus::Connected,
        ConnectionStatus::Disconnected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event delivered by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established.
    Open,
    /// Text payload received.
    Message(String),
    /// Connection closed.
    Close,
    /// Connection failed or dropped with an error.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eurusd() -> Instrument {
        Instrument::new("EURUSD").unwrap()
    }

    #[test]
    fn test_mid_price() {
        let quote = Quote::new(eurusd(), 1.1, 1.1002, 1000.0);
        assert!((quote.mid_price() - 1.1001).abs() < 1e-12);
    }

    #[test]
    fn test_field_accessor() {
        let quote = Quote::new(eurusd(), 1.0, 2.0, 0.0);
        assert_eq!(quote.field(PriceField::Bid), 1.0);
        assert_eq!(quote.field(PriceField::Ask), 2.0);
    }

    #[test]
    fn test_timestamp_utc() {
        let quote = Quote::new(eurusd(), 1.0, 1.0, 1_700_000_000.5);
        let ts = quote.timestamp_utc().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.timestamp_subsec_millis(), 500);

        let quote = Quote::new(eurusd(), 1.0, 1.0, f64::MAX);
        assert!(quote.timestamp_utc().is_none());
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(None, 1.0), Direction::NoBaseline);
        assert_eq!(Direction::between(Some(1.0), 1.5), Direction::Up);
        assert_eq!(Direction::between(Some(1.5), 1.0), Direction::Down);
        assert_eq!(Direction::between(Some(1.0), 1.0), Direction::Unchanged);
    }

    #[test]
    fn test_direction_has_no_tolerance() {
        // Identical at 5 decimals, still strictly ordered.
        assert_eq!(
            Direction::between(Some(1.100001), 1.100002),
            Direction::Up
        );
    }

    #[test]
    fn test_direction_movement() {
        assert!(Direction::Up.is_movement());
        assert!(Direction::Down.is_movement());
        assert!(!Direction::Unchanged.is_movement());
        assert!(!Direction::NoBaseline.is_movement());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ConnectionStatus::Disconnected).unwrap();
        assert_eq!(json, "\"disconnected\"");
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Connecting);
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::NoBaseline).unwrap();
        assert_eq!(json, "\"no_baseline\"");
    }
}
