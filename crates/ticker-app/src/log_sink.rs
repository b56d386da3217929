//! Structured-log renderer.
//!
//! Emits one log line per patch using the display formatting, so a headless
//! run shows the same values a table renderer would.

use ticker_render::format::{format_price, format_update_time};
use ticker_render::{RenderPatch, RenderSink};
use tracing::info;

pub struct LogSink {
    history_capacity: usize,
}

impl LogSink {
    pub fn new(history_capacity: usize) -> Self {
        Self { history_capacity }
    }
}

impl RenderSink for LogSink {
    fn apply(&mut self, patch: &RenderPatch) {
        match patch {
            RenderPatch::Quote(quote) => {
                let trend = quote
                    .sparkline(self.history_capacity)
                    .map(|line| line.trend);
                info!(
                    instrument = %quote.instrument,
                    bid = %format_price(quote.bid),
                    ask = %format_price(quote.ask),
                    bid_direction = %quote.bid_direction,
                    ask_direction = %quote.ask_direction,
                    pulse = ?quote.row_pulse(),
                    trend = ?trend,
                    points = quote.sparkline_series.len(),
                    updated = %format_update_time(quote.last_update_time),
                    "Quote"
                );
            }
            RenderPatch::Status { status } => {
                info!(status = %status, "Connection status");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use ticker_core::{InstrumentSet, TransportEvent};
    use ticker_render::TickerEngine;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn test_logs_one_line_per_patch() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = LogSink::new(30);
            sink.apply(&RenderPatch::Status {
                status: ticker_core::ConnectionStatus::Connected,
            });

            let mut engine = TickerEngine::new(InstrumentSet::default(), 30);
            let events = [
                TransportEvent::Message(
                    r#"{"symbol":"EURUSD","bid":1.1,"ask":1.1002,"timestamp":1}"#.to_string(),
                ),
                TransportEvent::Message(
                    r#"{"symbol":"EURUSD","bid":1.1001,"ask":1.1002,"timestamp":2}"#.to_string(),
                ),
            ];
            for event in events {
                if let Some(patch) = engine.handle(event) {
                    sink.apply(&patch);
                }
            }
        });

        let lines: Vec<String> = logs
            .lines()
            .into_iter()
            .filter(|line| line.contains("LogSink") || line.contains("log_sink"))
            .collect();
        assert_eq!(lines.len(), 3, "captured: {lines:?}");

        assert!(lines[0].contains("Connection status"));
        assert!(lines[0].contains("status=connected"));

        assert!(lines[1].contains("Quote"));
        assert!(lines[1].contains("instrument=EURUSD"));
        assert!(lines[1].contains("bid=1.10000"));
        assert!(lines[1].contains("ask=1.10020"));
        assert!(lines[1].contains("updated=00:00:01"));
        assert!(lines[1].contains("trend=None"));

        assert!(lines[2].contains("bid=1.10010"));
        assert!(lines[2].contains("bid_direction=up"));
        assert!(lines[2].contains("ask_direction=unchanged"));
        assert!(lines[2].contains("trend=Some(Rising)"));
    }
}
