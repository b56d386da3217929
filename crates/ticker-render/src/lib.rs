//! Derived visual state for the quote ticker.
//!
//! The engine turns transport events into minimal render patches. A renderer
//! never touches engine state: it receives immutable [`RenderPatch`] values
//! through a [`RenderSink`] and can request a full [`RenderSnapshot`] when it
//! first attaches.
//!
//! # Architecture
//!
//! ```text
//!  TransportEvent ──▶ TickerEngine
//!                       ├─ ConnectionStateMachine ──┐
//!                       └─ QuoteIngestor            │ status
//!                              │ Quote              ▼
//!                              ▼            RenderStateBuilder
//!                        HistoryStore ◀────────┤
//!                        DirectionClassifier ◀─┘
//!                                              │ RenderPatch
//!                                              ▼
//!                                         RenderSink(s)
//! ```
//!
//! # Usage
//!
//! ```
//! use ticker_core::{InstrumentSet, TransportEvent, DEFAULT_HISTORY_CAPACITY};
//! use ticker_render::{RenderPatch, TickerEngine};
//!
//! let mut engine = TickerEngine::new(InstrumentSet::default(), DEFAULT_HISTORY_CAPACITY);
//! engine.handle(TransportEvent::Open);
//! let patch = engine.handle(TransportEvent::Message(
//!     r#"{"symbol":"EURUSD","bid":1.1,"ask":1.1002,"timestamp":1000}"#.to_string(),
//! ));
//! assert!(matches!(patch, Some(RenderPatch::Quote(_))));
//! ```

mod builder;
mod engine;
pub mod format;
mod sink;
mod sparkline;
mod types;

pub use builder::RenderStateBuilder;
pub use engine::TickerEngine;
pub use sink::{dispatch, ChannelSink, RenderSink};
pub use sparkline::{Sparkline, SparklinePoint, Trend};
pub use types::{InstrumentView, QuotePatch, RenderPatch, RenderSnapshot, RowPulse};
