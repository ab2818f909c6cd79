use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::VENUE;
use super::client::{OrderBookRequest, TradesRequest, VenueClient, VenueOrderBook, VenueTrade};
use super::pricing::PriceScaling;
use super::side::SideMapper;
use super::symbol::SymbolMapper;
use crate::config::ConnectivityPolicy;
use crate::error::{GatewayError, TransportError};
use crate::messages::{
    BookLevel, BookSnapshot, ConnectionChannel, ConnectivityEvent, Feed, MarketDataEvent,
    TradeMessage,
};
use crate::ports::{Lifecycle, MarketDataSource};
use crate::schedule::{ScheduledTask, TaskSet};
use crate::transport::{EventSink, Subjects};

/// Polling intervals, one per feed
#[derive(Debug, Clone, Copy)]
pub struct FeedIntervals {
    pub book: Duration,
    pub trades: Duration,
}

/// Order book and trade polling for the configured pair
pub struct VexaMarketData {
    inner: Arc<MarketDataInner>,
    intervals: FeedIntervals,
    tasks: TaskSet,
    started: AtomicBool,
}

struct MarketDataInner {
    client: Arc<dyn VenueClient>,
    symbols: Arc<SymbolMapper>,
    pricing: PriceScaling,
    policy: ConnectivityPolicy,
    events: EventSink<MarketDataEvent>,
    connectivity: EventSink<ConnectivityEvent>,
    book_subject: String,
    trade_subject: String,
    connectivity_subject: String,
    sequence: AtomicU64,
    /// Highest trade id seen; `None` until the first successful trade poll
    last_trade_id: Mutex<Option<u64>>,
}

fn venue_time(millis: Option<i64>) -> DateTime<Utc> {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

impl MarketDataInner {
    fn symbol(&self) -> String {
        self.symbols.symbol().to_string()
    }

    async fn signal_connected(&self) {
        self.connectivity
            .emit(
                &self.connectivity_subject,
                &ConnectivityEvent::connected(VENUE, ConnectionChannel::MarketData),
            )
            .await;
    }

    async fn publish_failure(&self, feed: Feed, error: GatewayError) {
        warn!("{} {:?} refresh failed: {}", VENUE, feed, error);
        let subject = match feed {
            Feed::OrderBook => &self.book_subject,
            Feed::Trades => &self.trade_subject,
        };
        self.events
            .emit(
                subject,
                &MarketDataEvent::Failed {
                    symbol: self.symbol(),
                    feed,
                    reason: error.to_string(),
                },
            )
            .await;
    }

    fn levels(&self, raw: Vec<Vec<Decimal>>) -> Result<Vec<BookLevel>, GatewayError> {
        raw.into_iter()
            .map(|level| match level.as_slice() {
                // [price, amount, volume]; volume is dropped
                [price, amount, ..] => Ok(BookLevel::new(self.pricing.read(*price)?, *amount)),
                _ => Err(GatewayError::from(TransportError::Request(format!(
                    "malformed book level {:?}",
                    level
                )))),
            })
            .collect()
    }

    fn snapshot(
        &self,
        book: VenueOrderBook,
        timestamp: Option<i64>,
    ) -> Result<BookSnapshot, GatewayError> {
        let bids = self.levels(book.buy)?;
        let asks = self.levels(book.sell)?;
        Ok(BookSnapshot {
            symbol: self.symbol(),
            bids,
            asks,
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            venue_time: venue_time(timestamp),
        })
    }

    async fn poll_book_once(&self) {
        if self.policy == ConnectivityPolicy::OnAttempt {
            self.signal_connected().await;
        }

        let request = OrderBookRequest { pair: self.symbol() };
        let outcome = match self.client.get_order_books(request).await {
            Ok(response) => {
                let timestamp = response.timestamp;
                response
                    .into_data("get_order_books")
                    .and_then(|book| self.snapshot(book, timestamp))
            }
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(snapshot) => {
                if self.policy == ConnectivityPolicy::OnSuccess {
                    self.signal_connected().await;
                }
                debug!(
                    "{} book #{} {} bids {} asks",
                    VENUE,
                    snapshot.sequence,
                    snapshot.bids.len(),
                    snapshot.asks.len()
                );
                self.events
                    .emit(&self.book_subject, &MarketDataEvent::Book(snapshot))
                    .await;
            }
            Err(e) => self.publish_failure(Feed::OrderBook, e).await,
        }
    }

    /// Trades newer than the watermark, ascending by id. The first call
    /// only seeds the watermark.
    fn fresh_trades(&self, mut trades: Vec<VenueTrade>) -> Vec<VenueTrade> {
        trades.sort_by_key(|trade| trade.tid);
        let newest = trades.last().map(|trade| trade.tid);

        let mut last = self.last_trade_id.lock().unwrap_or_else(|e| e.into_inner());
        let fresh = match *last {
            None => {
                debug!("{} trade watermark seeded at {:?}", VENUE, newest);
                Vec::new()
            }
            Some(seen) => trades.into_iter().filter(|trade| trade.tid > seen).collect(),
        };
        *last = Some(last.unwrap_or(0).max(newest.unwrap_or(0)));
        fresh
    }

    fn trade_message(&self, trade: VenueTrade) -> Result<TradeMessage, GatewayError> {
        Ok(TradeMessage {
            symbol: self.symbol(),
            trade_id: trade.tid.to_string(),
            price: self.pricing.read(trade.price)?,
            quantity: trade.amount,
            aggressor_side: SideMapper::from_venue(&trade.side)?,
            venue_time: venue_time(Some(trade.date)),
        })
    }

    async fn poll_trades_once(&self) {
        if self.policy == ConnectivityPolicy::OnAttempt {
            self.signal_connected().await;
        }

        let request = TradesRequest { pair: self.symbol() };
        let outcome = match self.client.get_trades(request).await {
            Ok(response) => response.into_data("get_trades"),
            Err(e) => Err(e.into()),
        };

        let trades = match outcome {
            Ok(trades) => trades,
            Err(e) => return self.publish_failure(Feed::Trades, e).await,
        };
        if self.policy == ConnectivityPolicy::OnSuccess {
            self.signal_connected().await;
        }

        for trade in self.fresh_trades(trades) {
            match self.trade_message(trade) {
                Ok(message) => {
                    self.events
                        .emit(&self.trade_subject, &MarketDataEvent::Trade(message))
                        .await;
                }
                Err(e) => self.publish_failure(Feed::Trades, e).await,
            }
        }
    }
}

impl VexaMarketData {
    pub fn new(
        client: Arc<dyn VenueClient>,
        symbols: Arc<SymbolMapper>,
        pricing: PriceScaling,
        policy: ConnectivityPolicy,
        events: EventSink<MarketDataEvent>,
        connectivity: EventSink<ConnectivityEvent>,
        intervals: FeedIntervals,
    ) -> Self {
        let book_subject = Subjects::market_data(symbols.symbol().as_str());
        let trade_subject = Subjects::trades(symbols.symbol().as_str());
        Self {
            inner: Arc::new(MarketDataInner {
                client,
                symbols,
                pricing,
                policy,
                events,
                connectivity,
                book_subject,
                trade_subject,
                connectivity_subject: Subjects::connectivity(VENUE),
                sequence: AtomicU64::new(0),
                last_trade_id: Mutex::new(None),
            }),
            intervals,
            tasks: TaskSet::new(),
            started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Lifecycle for VexaMarketData {
    fn start(&self) {
        if self.tasks.is_closed() || self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(
            "{} market data polling {} (book every {:?}, trades every {:?})",
            VENUE,
            self.inner.symbols.symbol(),
            self.intervals.book,
            self.intervals.trades
        );

        let inner = self.inner.clone();
        self.tasks.push(ScheduledTask::every(
            "vexa.market_data.book",
            Duration::ZERO,
            self.intervals.book,
            move || {
                let inner = inner.clone();
                async move { inner.poll_book_once().await }
            },
        ));

        let inner = self.inner.clone();
        self.tasks.push(ScheduledTask::every(
            "vexa.market_data.trades",
            Duration::ZERO,
            self.intervals.trades,
            move || {
                let inner = inner.clone();
                async move { inner.poll_trades_once().await }
            },
        ));
    }

    async fn dispose(&self) {
        self.tasks.abort_all();
        self.inner.events.close().await;
        self.inner.connectivity.close().await;
        debug!("{} market data disposed", VENUE);
    }
}

#[async_trait]
impl MarketDataSource for VexaMarketData {
    fn is_price_source(&self) -> bool {
        true
    }

    async fn poll_book_once(&self) {
        self.inner.poll_book_once().await;
    }

    async fn poll_trades_once(&self) {
        self.inner.poll_trades_once().await;
    }
}
