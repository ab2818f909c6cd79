use std::time::{Duration, Instant};

use super::{Side, TimeInForce};
use crate::instruments::CurrencyPair;
use crate::values::{Price, Quantity};

/// Engine-assigned order identifier, unique per order
pub type ClientOrderId = String;

/// Order submission request from the upstream engine
///
/// Created per send and not retained by the gateway. `created_at` is the
/// monotonic instant the request was built, used for latency reporting.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub client_order_id: ClientOrderId,
    pub pair: CurrencyPair,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
    pub time_in_force: TimeInForce,
    pub created_at: Instant,
}

impl OrderRequest {
    /// Create a good-till-cancelled limit order request
    pub fn limit(
        client_order_id: impl Into<ClientOrderId>,
        pair: CurrencyPair,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            pair,
            side,
            quantity,
            price,
            time_in_force: TimeInForce::GTC,
            created_at: Instant::now(),
        }
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Time elapsed since the request was built
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Cancel request for an order the venue has already acknowledged
#[derive(Debug, Clone)]
pub struct CancelRequest {
    pub client_order_id: ClientOrderId,
    /// Venue-assigned identifier returned by a previous send
    pub external_id: String,
    pub side: Side,
    pub pair: CurrencyPair,
    pub created_at: Instant,
}

impl CancelRequest {
    pub fn new(
        client_order_id: impl Into<ClientOrderId>,
        external_id: impl Into<String>,
        side: Side,
        pair: CurrencyPair,
    ) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            external_id: external_id.into(),
            side,
            pair,
            created_at: Instant::now(),
        }
    }

    /// Time elapsed since the request was built
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Replace = cancel the resting order, then send its successor
#[derive(Debug, Clone)]
pub struct ReplaceRequest {
    pub cancel: CancelRequest,
    pub order: OrderRequest,
}

impl ReplaceRequest {
    pub fn new(cancel: CancelRequest, order: OrderRequest) -> Self {
        Self { cancel, order }
    }
}
