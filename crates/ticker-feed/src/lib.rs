//! Streaming quote state for the ticker.
//!
//! Turns raw transport payloads into validated quotes and maintains the
//! per-instrument state a display needs:
//! - `QuoteIngestor`: parse/validate inbound messages, filter by instrument
//! - `HistoryStore`: bounded FIFO window of mid-prices per instrument
//! - `DirectionClassifier`: up/down/unchanged against the last displayed value
//! - `ConnectionStateMachine`: transport lifecycle status
//!
//! Everything here is synchronous and owned; callers thread a single
//! mutable instance through their event loop.

pub mod classifier;
pub mod connection;
pub mod error;
pub mod history;
pub mod parser;

pub use classifier::DirectionClassifier;
pub use connection::ConnectionStateMachine;
pub use error::{FeedError, FeedResult};
pub use history::{HistoryStore, PriceHistory};
pub use parser::{IngestStats, QuoteIngestor, RawQuote};
