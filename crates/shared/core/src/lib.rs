//! Hermes Core Domain
//!
//! Venue-agnostic domain types shared by every Hermes gateway.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Balance, CancelRequest, ClientOrderId, FeeSchedule, OrderRequest, ReplaceRequest, Side,
    TimeInForce,
};
pub use instruments::{CurrencyPair, PairParseError};
pub use values::{Currency, Price, Quantity};
