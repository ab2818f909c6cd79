use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Currency, Quantity};

/// Balance of one currency held at a venue
///
/// Balances of the two currencies of a pair are refreshed independently and
/// are never guaranteed to be a consistent snapshot of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: Currency,
    /// Free to trade
    pub available: Quantity,
    /// Reserved by resting orders
    pub held: Quantity,
}

impl Balance {
    pub fn new(currency: impl Into<Currency>, available: Quantity, held: Quantity) -> Self {
        Self {
            currency: currency.into(),
            available,
            held,
        }
    }

    /// Available plus held
    pub fn total(&self) -> Decimal {
        self.available + self.held
    }
}
