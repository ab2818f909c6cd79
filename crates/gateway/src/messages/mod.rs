//! Event types published by gateways to the upstream engine
//!
//! One stream per concern. Failures travel on the same stream as successes
//! so a consumer sees exactly one outcome per operation.

pub mod connectivity;
pub mod market_data;
pub mod order;
pub mod position;

pub use connectivity::{ConnectivityEvent, ConnectivityStatus, ConnectionChannel};
pub use market_data::{BookLevel, BookSnapshot, Feed, MarketDataEvent, TradeMessage};
pub use order::{OrderAction, OrderEvent, OrderRejection, OrderUpdate};
pub use position::PositionEvent;
