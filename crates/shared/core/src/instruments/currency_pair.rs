use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::values::Currency;

/// Separators accepted when parsing a pair from configuration
const SEPARATORS: [char; 3] = ['/', '-', '_'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairParseError {
    #[error("Currency pair '{0}' has no separator (expected BASE/QUOTE)")]
    MissingSeparator(String),

    #[error("Currency pair '{0}' has no base currency")]
    MissingBase(String),

    #[error("Currency pair '{0}' has no quote currency")]
    MissingQuote(String),

    #[error("Currency pair '{0}' has more than one separator")]
    ExtraSeparator(String),

    #[error("Currency pair '{0}' quotes a currency against itself")]
    SameCurrency(String),
}

/// A spot trading pair (e.g., BTC/USDT)
///
/// Immutable once built; currencies are stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency (the one being bought/sold)
    base: Currency,
    /// Quote currency (the one used to price the base)
    quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: impl Into<Currency>, quote: impl Into<Currency>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Both currencies, base first
    pub fn currencies(&self) -> [&str; 2] {
        [&self.base, &self.quote]
    }
}

impl FromStr for CurrencyPair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (base, quote) = raw
            .split_once(SEPARATORS)
            .ok_or_else(|| PairParseError::MissingSeparator(raw.to_string()))?;

        let base = base.trim();
        let quote = quote.trim();
        if base.is_empty() {
            return Err(PairParseError::MissingBase(raw.to_string()));
        }
        if quote.is_empty() {
            return Err(PairParseError::MissingQuote(raw.to_string()));
        }
        if quote.contains(SEPARATORS) {
            return Err(PairParseError::ExtraSeparator(raw.to_string()));
        }

        let pair = Self::new(base, quote);
        if pair.base == pair.quote {
            return Err(PairParseError::SameCurrency(raw.to_string()));
        }
        Ok(pair)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
