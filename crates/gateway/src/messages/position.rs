//! Balance refresh events

use hermes_core::{Balance, Currency};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionEvent {
    /// Fresh balance for one currency
    Updated(Balance),
    /// The balance query for `currency` failed this cycle
    Failed { currency: Currency, reason: String },
}

impl PositionEvent {
    pub fn currency(&self) -> &str {
        match self {
            Self::Updated(balance) => &balance.currency,
            Self::Failed { currency, .. } => currency,
        }
    }
}
