//! Core domain types for the streaming quote ticker.
//!
//! This crate provides fundamental types used throughout the ticker:
//! - `Instrument`, `InstrumentSet`: The fixed, configured set of symbols
//! - `Quote`: A single bid/ask observation for one instrument
//! - `PriceField`, `Direction`: Per-field change classification
//! - `ConnectionStatus`, `TransportEvent`: Transport lifecycle vocabulary

pub mod error;
pub mod instrument;
pub mod types;

pub use error::{CoreError, Result};
pub use instrument::{Instrument, InstrumentSet, DEFAULT_INSTRUMENTS};
pub use types::{
    epoch_seconds_to_utc, ConnectionStatus, Direction, PriceField, Quote, TransportEvent,
};

/// Maximum number of mid-prices retained per instrument for sparklines.
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

/// Number of decimals used when a price is shown to the user.
pub const PRICE_DISPLAY_DECIMALS: usize = 5;
