//! Market data message types

use chrono::{DateTime, Utc};
use hermes_core::{Price, Quantity, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order book level (price + quantity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub quantity: Quantity,
}

impl BookLevel {
    /// Create a new book level
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// Full order book snapshot as reported by the venue
///
/// Levels keep the venue's ordering (expected best price first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    /// Per-gateway sequence, increases by one per published snapshot
    pub sequence: u64,
    /// Venue-reported time of the snapshot
    pub venue_time: DateTime<Utc>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }
}

/// Trade execution message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeMessage {
    pub symbol: String,
    pub trade_id: String,
    pub price: Price,
    pub quantity: Quantity,
    pub aggressor_side: Side,
    pub venue_time: DateTime<Utc>,
}

impl TradeMessage {
    /// Get the notional value of the trade
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// Polled market data feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feed {
    OrderBook,
    Trades,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDataEvent {
    Book(BookSnapshot),
    Trade(TradeMessage),
    /// A refresh of `feed` failed; the next scheduled refresh is the only retry
    Failed {
        symbol: String,
        feed: Feed,
        reason: String,
    },
}
