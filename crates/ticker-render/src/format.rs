//! Display formatting helpers.

use ticker_core::{epoch_seconds_to_utc, PRICE_DISPLAY_DECIMALS};

/// Placeholder for values that cannot be shown.
pub const PLACEHOLDER: &str = "-";

/// Format a price with the fixed display precision.
pub fn format_price(price: f64) -> String {
    format!("{:.*}", PRICE_DISPLAY_DECIMALS, price)
}

/// Format a price that may not have been quoted yet.
pub fn format_optional_price(price: Option<f64>) -> String {
    price.map_or_else(|| PLACEHOLDER.to_string(), format_price)
}

/// Format an epoch-seconds timestamp as `HH:MM:SS` (UTC).
pub fn format_update_time(timestamp: f64) -> String {
    epoch_seconds_to_utc(timestamp)
        .map(|ts| ts.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1.1), "1.10000");
        assert_eq!(format_price(150.123456), "150.12346");
        assert_eq!(format_optional_price(None), "-");
        assert_eq!(format_optional_price(Some(1.08512)), "1.08512");
    }

    #[test]
    fn test_format_update_time() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_update_time(1_700_000_000.0), "22:13:20");
        assert_eq!(format_update_time(f64::NAN), "-");
    }
}
