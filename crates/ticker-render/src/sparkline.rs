//! Sparkline geometry for a mid-price window.
//!
//! Points are normalized to the unit square. `x` is the sample's slot in a
//! full window, so a partially filled window draws from the left edge.
//! `y` is scaled between the window's min and max; a flat window maps to 0.

use serde::Serialize;

/// One normalized sparkline vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparklinePoint {
    pub x: f64,
    pub y: f64,
}

/// Overall slope of the window (first vs last sample).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Normalized trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub points: Vec<SparklinePoint>,
    pub min: f64,
    pub max: f64,
    pub trend: Trend,
}

impl Sparkline {
    /// Build geometry for a window of at most `capacity` samples.
    ///
    /// Returns None for fewer than two samples, or when the window's extent
    /// is not finite (mid-prices that overflowed to infinity).
    pub fn from_series(series: &[f64], capacity: usize) -> Option<Self> {
        let (first, last) = match series {
            [first, .., last] => (*first, *last),
            _ => return None,
        };

        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;
        if !spread.is_finite() {
            return None;
        }
        let range = if spread == 0.0 { 1.0 } else { spread };
        let slots = capacity.max(series.len()).saturating_sub(1).max(1) as f64;

        let points = series
            .iter()
            .enumerate()
            .map(|(i, v)| SparklinePoint {
                x: i as f64 / slots,
                y: (v - min) / range,
            })
            .collect();

        let trend = if last > first {
            Trend::Rising
        } else if last < first {
            Trend::Falling
        } else {
            Trend::Flat
        };

        Some(Self {
            points,
            min,
            max,
            trend,
        })
    }
}
