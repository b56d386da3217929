//! Instrument identity and the configured instrument set.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruments shown when no explicit set is configured.
pub const DEFAULT_INSTRUMENTS: [&str; 3] = ["EURUSD", "GBPUSD", "USDJPY"];

/// Tradable instrument identifier (e.g. a currency-pair symbol).
///
/// Symbols are upper-cased ASCII alphanumerics. Construction through
/// [`Instrument::new`] enforces this so every `Instrument` in the system
/// is comparable against wire symbols without further normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument(String);

impl Instrument {
    /// Create a new instrument from a symbol.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self> {
        let symbol = symbol.as_ref().trim().to_ascii_uppercase();
        if symbol.is_empty() || !symbol.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidSymbol(symbol));
        }
        Ok(Self(symbol))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Instrument {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Instrument> for String {
    fn from(value: Instrument) -> Self {
        value.0
    }
}

impl AsRef<str> for Instrument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed set of instruments the ticker displays.
///
/// Instruments are known at load time and never discovered from the feed.
/// Iteration follows configuration order, which is also the row order a
/// renderer should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentSet {
    instruments: Vec<Instrument>,
}

impl InstrumentSet {
    /// Build a set from configured symbols.
    ///
    /// Fails on an empty list, an invalid symbol, or a duplicate.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut instruments: Vec<Instrument> = Vec::new();
        for symbol in symbols {
            let instrument = Instrument::new(symbol)?;
            if instruments.contains(&instrument) {
                return Err(CoreError::DuplicateInstrument(instrument.0));
            }
            instruments.push(instrument);
        }

        if instruments.is_empty() {
            return Err(CoreError::InvalidConfig(
                "instrument set must not be empty".to_string(),
            ));
        }

        Ok(Self { instruments })
    }

    /// Look up a configured instrument by its wire symbol (exact match).
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.as_str() == symbol)
    }

    /// Check whether a wire symbol is configured.
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Iterate instruments in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Number of configured instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Always false for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Default for InstrumentSet {
    fn default() -> Self {
        Self {
            instruments: DEFAULT_INSTRUMENTS
                .iter()
                .map(|s| Instrument(s.to_string()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InstrumentSet {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}
