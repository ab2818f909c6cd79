//! Scripted [`VenueClient`] for tests.
//!
//! Each call pops the next reply queued for its method and records the
//! request. Exhausted queues fall back to a benign success: a fresh order id,
//! a zero balance, an empty book, no trades.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use hermes_core::Side;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;

use crate::adapters::vexa::client::{
    BalanceRequest, CancelOrderRequest, CreateOrderRequest, CreatedOrder, OrderBookRequest,
    TradesRequest, VenueBalance, VenueClient, VenueOrderBook, VenueResponse, VenueTrade,
};
use crate::adapters::vexa::side::SideMapper;
use crate::config::GatewayConfig;
use crate::error::TransportError;

pub type Reply<T> = Result<VenueResponse<T>, TransportError>;

/// A request the scripted venue received
#[derive(Debug, Clone, PartialEq)]
pub enum VenueCall {
    CreateOrder(CreateOrderRequest),
    Cancel(CancelOrderRequest),
    GetBalance(BalanceRequest),
    GetOrderBooks(OrderBookRequest),
    GetTrades(TradesRequest),
}

#[derive(Default)]
pub struct ScriptedVenue {
    orders: Mutex<VecDeque<Reply<CreatedOrder>>>,
    cancels: Mutex<VecDeque<Reply<IgnoredAny>>>,
    /// Keyed by venue currency token
    balances: Mutex<HashMap<String, VecDeque<Reply<VenueBalance>>>>,
    books: Mutex<VecDeque<Reply<VenueOrderBook>>>,
    trades: Mutex<VecDeque<Reply<Vec<VenueTrade>>>>,
    calls: Mutex<Vec<VenueCall>>,
    next_oid: AtomicU64,
    latency: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl ScriptedVenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn push_order_reply(&self, reply: Reply<CreatedOrder>) {
        lock(&self.orders).push_back(reply);
    }

    pub fn push_cancel_reply(&self, reply: Reply<IgnoredAny>) {
        lock(&self.cancels).push_back(reply);
    }

    pub fn push_balance_reply(&self, currency_token: &str, reply: Reply<VenueBalance>) {
        lock(&self.balances)
            .entry(currency_token.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn push_book_reply(&self, reply: Reply<VenueOrderBook>) {
        lock(&self.books).push_back(reply);
    }

    pub fn push_trades_reply(&self, reply: Reply<Vec<VenueTrade>>) {
        lock(&self.trades).push_back(reply);
    }

    /// Every request received so far, in arrival order
    pub fn calls(&self) -> Vec<VenueCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn created_orders(&self) -> Vec<CreateOrderRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                VenueCall::CreateOrder(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn balance_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                VenueCall::GetBalance(request) => Some(request.symbol),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: VenueCall) {
        lock(&self.calls).push(call);
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl VenueClient for ScriptedVenue {
    async fn create_order(&self, request: CreateOrderRequest) -> Reply<CreatedOrder> {
        self.record(VenueCall::CreateOrder(request));
        let reply = lock(&self.orders).pop_front();
        self.delay().await;
        reply.unwrap_or_else(|| {
            let n = self.next_oid.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(VenueResponse::ok(CreatedOrder {
                order_oid: format!("oid-{}", n),
            }))
        })
    }

    async fn cancel(&self, request: CancelOrderRequest) -> Reply<IgnoredAny> {
        self.record(VenueCall::Cancel(request));
        let reply = lock(&self.cancels).pop_front();
        self.delay().await;
        reply.unwrap_or(Ok(VenueResponse::ok(IgnoredAny)))
    }

    async fn get_balance(&self, request: BalanceRequest) -> Reply<VenueBalance> {
        let reply = lock(&self.balances)
            .get_mut(&request.symbol)
            .and_then(|queue| queue.pop_front());
        self.record(VenueCall::GetBalance(request));
        self.delay().await;
        reply.unwrap_or_else(|| Ok(VenueResponse::ok(balance(Decimal::ZERO, Decimal::ZERO))))
    }

    async fn get_order_books(&self, request: OrderBookRequest) -> Reply<VenueOrderBook> {
        self.record(VenueCall::GetOrderBooks(request));
        let reply = lock(&self.books).pop_front();
        self.delay().await;
        reply.unwrap_or_else(|| Ok(VenueResponse::ok(VenueOrderBook::default())))
    }

    async fn get_trades(&self, request: TradesRequest) -> Reply<Vec<VenueTrade>> {
        self.record(VenueCall::GetTrades(request));
        let reply = lock(&self.trades).pop_front();
        self.delay().await;
        reply.unwrap_or_else(|| Ok(VenueResponse::ok(Vec::new())))
    }
}

// Fixtures

pub fn balance(balance: Decimal, freeze_balance: Decimal) -> VenueBalance {
    VenueBalance {
        balance,
        freeze_balance,
    }
}

/// Book from `(price, amount)` levels; volume is filled in as price * amount
pub fn book(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> VenueOrderBook {
    let levels = |side: &[(Decimal, Decimal)]| {
        side.iter()
            .map(|(price, amount)| vec![*price, *amount, *price * *amount])
            .collect()
    };
    VenueOrderBook {
        buy: levels(bids),
        sell: levels(asks),
    }
}

pub fn trade(tid: u64, price: Decimal, amount: Decimal, side: Side) -> VenueTrade {
    VenueTrade {
        tid,
        price,
        amount,
        side: SideMapper::to_venue(side).to_string(),
        date: 1_700_000_000_000 + tid as i64,
    }
}

/// Config for `pair` with short, distinct polling intervals
pub fn test_config(pair: &str) -> GatewayConfig {
    let mut config = GatewayConfig::for_pair(pair);
    config.api_key = "test-key".to_string();
    config.api_secret = "test-secret".to_string();
    config.polling.connect_delay_ms = 100;
    config.polling.position_initial_delay_ms = 200;
    config.polling.position_interval_ms = 1_000;
    config.polling.book_interval_ms = 500;
    config.polling.trade_interval_ms = 700;
    config
}
