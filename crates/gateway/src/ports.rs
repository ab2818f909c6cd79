//! Engine-facing ports
//!
//! The trading engine drives a venue only through these traits. Outcomes of
//! venue calls are not returned from the command methods; they arrive on the
//! gateway's event streams.

use async_trait::async_trait;
use hermes_core::{CancelRequest, ClientOrderId, FeeSchedule, OrderRequest, Price, ReplaceRequest};

use crate::error::Result;

/// Start and teardown of a runtime component
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Spawn the component's scheduled tasks. Calling it after `dispose` does nothing.
    fn start(&self);

    /// Abort every task and close every event sink.
    ///
    /// Once this returns the component publishes nothing more. Idempotent.
    async fn dispose(&self);
}

/// Order commands
///
/// `Err` is returned only for requests refused before any network call. A
/// request that reaches the venue yields exactly one order event instead.
#[async_trait]
pub trait OrderEntry: Lifecycle {
    async fn send_order(&self, order: OrderRequest) -> Result<()>;

    async fn cancel_order(&self, cancel: CancelRequest) -> Result<()>;

    /// Cancel then send. Not atomic.
    async fn replace_order(&self, replace: ReplaceRequest) -> Result<()>;

    fn generate_client_order_id(&self) -> ClientOrderId;

    fn supports_cancel_all(&self) -> bool;

    async fn cancel_all_open_orders(&self) -> Result<()>;
}

/// Periodic balance refresh
#[async_trait]
pub trait PositionSource: Lifecycle {
    /// Refresh every currency of the pair once
    async fn poll_once(&self);
}

/// Periodic book and trade refresh
#[async_trait]
pub trait MarketDataSource: Lifecycle {
    /// Whether this source is authoritative for its pair
    fn is_price_source(&self) -> bool;

    async fn poll_book_once(&self);

    async fn poll_trades_once(&self);
}

/// Static venue metadata
pub trait ExchangeDetails: Send + Sync {
    fn name(&self) -> &str;

    fn fee_schedule(&self) -> FeeSchedule;

    fn tick_size(&self) -> Price;

    fn supports_self_trade_prevention(&self) -> bool;

    fn supports_cancel_all(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_are_object_safe() {
        fn _orders(_: &dyn OrderEntry) {}
        fn _positions(_: &dyn PositionSource) {}
        fn _market_data(_: &dyn MarketDataSource) {}
        fn _details(_: &dyn ExchangeDetails) {}
    }
}
