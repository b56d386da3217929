//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use ticker_core::{InstrumentSet, DEFAULT_HISTORY_CAPACITY, DEFAULT_INSTRUMENTS};
use ticker_dashboard::DashboardConfig;
use ticker_ws::ConnectionConfig;

/// Config file used when neither `--config` nor `TICKER_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Prefix for environment overrides (`TICKER__WEBSOCKET__URL`).
const ENV_PREFIX: &str = "TICKER";
const ENV_SEPARATOR: &str = "__";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default tracing filter. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instruments shown, in display order.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
    /// Mid-prices kept per instrument for the sparkline.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Quote source connection.
    #[serde(default)]
    pub websocket: ConnectionConfig,
    /// Web dashboard.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_instruments() -> Vec<String> {
    DEFAULT_INSTRUMENTS.iter().map(|s| s.to_string()).collect()
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            history_capacity: default_history_capacity(),
            websocket: ConnectionConfig::default(),
            dashboard: DashboardConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file, then apply `TICKER__…` environment overrides.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::new(path, ::config::FileFormat::Toml))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without environment overrides.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> AppResult<()> {
        self.instrument_set()?;

        if self.history_capacity < 2 {
            return Err(AppError::Config(format!(
                "history_capacity must be at least 2, got {}",
                self.history_capacity
            )));
        }

        let url = &self.websocket.url;
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(AppError::Config(format!(
                "websocket.url must be a ws:// or wss:// URL, got {url}"
            )));
        }

        if self.websocket.reconnect_base_delay_ms > self.websocket.reconnect_max_delay_ms {
            return Err(AppError::Config(
                "websocket.reconnect_base_delay_ms exceeds reconnect_max_delay_ms".to_string(),
            ));
        }

        if self.dashboard.enabled && self.dashboard.max_connections == 0 {
            return Err(AppError::Config(
                "dashboard.max_connections must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Validated instrument set.
    pub fn instrument_set(&self) -> AppResult<InstrumentSet> {
        Ok(InstrumentSet::new(&self.instruments)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.instruments, vec!["EURUSD", "GBPUSD", "USDJPY"]);
        assert_eq!(config.history_capacity, 30);
        assert!(!config.dashboard.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.websocket.url, "ws://localhost:9002");
        assert_eq!(config.telemetry.log_filter, "info");
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("history_capacity"));
        assert!(toml_str.contains("[websocket]"));
    }
}
