//! Tradeable instrument definitions
//!
//! Hermes gateways only trade spot currency pairs.

mod currency_pair;

pub use currency_pair::{CurrencyPair, PairParseError};
