//! Prometheus metrics for the quote ticker.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A registration failure means a
//! duplicate metric name, which is a startup bug. These panics only happen
//! during static initialization.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_gauge_vec, Counter,
    CounterVec, Encoder, Gauge, GaugeVec, TextEncoder,
};
use ticker_core::{ConnectionStatus, Direction, PriceField};

/// Accepted quotes per instrument.
pub static QUOTES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ticker_quotes_total",
        "Total quotes applied to display state",
        &["instrument"]
    )
    .unwrap()
});

/// Payloads rejected as malformed.
pub static PARSE_ERRORS_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "ticker_parse_errors_total",
        "Total inbound payloads rejected as malformed"
    )
    .unwrap()
});

/// Well-formed quotes for instruments outside the configured set.
pub static UNKNOWN_INSTRUMENT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "ticker_unknown_instrument_total",
        "Total quotes dropped for unconfigured instruments"
    )
    .unwrap()
});

/// Connection status (1 = active, 0 = inactive).
/// Labels: status (connecting/connected/disconnected)
pub static CONNECTION_STATUS: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "ticker_connection_status",
        "Connection status (1=active, 0=inactive)",
        &["status"]
    )
    .unwrap()
});

/// Direction classifications.
pub static DIRECTION_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ticker_direction_total",
        "Total direction classifications",
        &["instrument", "field", "direction"]
    )
    .unwrap()
});

/// Transport reconnect attempts.
pub static RECONNECT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "ticker_reconnect_total",
        "Total transport reconnect attempts"
    )
    .unwrap()
});

/// Connected dashboard clients.
pub static DASHBOARD_CLIENTS: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "ticker_dashboard_clients",
        "Currently connected dashboard clients"
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    /// Record an accepted quote.
    pub fn quote_accepted(instrument: &str) {
        QUOTES_TOTAL.with_label_values(&[instrument]).inc();
    }

    pub fn parse_error() {
        PARSE_ERRORS_TOTAL.inc();
    }

    pub fn unknown_instrument() {
        UNKNOWN_INSTRUMENT_TOTAL.inc();
    }

    /// Set the active connection status.
    /// Only the active status is 1, all others are 0.
    pub fn connection_status_set(status: ConnectionStatus) {
        for s in ConnectionStatus::ALL {
            CONNECTION_STATUS.with_label_values(&[s.as_str()]).set(0.0);
        }
        CONNECTION_STATUS
            .with_label_values(&[status.as_str()])
            .set(1.0);
    }

    /// Record a field classification.
    pub fn direction(instrument: &str, field: PriceField, direction: Direction) {
        DIRECTION_TOTAL
            .with_label_values(&[instrument, field.as_str(), direction.as_str()])
            .inc();
    }

    pub fn reconnect() {
        RECONNECT_TOTAL.inc();
    }

    pub fn dashboard_clients_set(count: usize) {
        DASHBOARD_CLIENTS.set(count as f64);
    }
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_text() -> TelemetryResult<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
}
