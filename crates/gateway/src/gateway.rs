//! Engine-facing facade over one venue and one pair

use std::sync::Arc;

use hermes_core::CurrencyPair;
use log::info;

use crate::messages::{ConnectivityEvent, MarketDataEvent, OrderEvent, PositionEvent};
use crate::ports::{ExchangeDetails, MarketDataSource, OrderEntry, PositionSource};
use crate::transport::EventSink;
use crate::transport::channel::{ChannelPublisher, ChannelSubscriber};

/// One broadcast channel per event stream
///
/// Delivery is FIFO within a stream. Nothing orders events across streams.
#[derive(Clone)]
pub struct GatewayStreams {
    orders: ChannelPublisher<OrderEvent>,
    positions: ChannelPublisher<PositionEvent>,
    market_data: ChannelPublisher<MarketDataEvent>,
    connectivity: ChannelPublisher<ConnectivityEvent>,
}

impl GatewayStreams {
    pub fn new(capacity: usize) -> Self {
        Self {
            orders: ChannelPublisher::with_capacity(capacity),
            positions: ChannelPublisher::with_capacity(capacity),
            market_data: ChannelPublisher::with_capacity(capacity),
            connectivity: ChannelPublisher::with_capacity(capacity),
        }
    }

    // Each component gets its own sink so disposing one closes only its own output

    pub fn order_sink(&self) -> EventSink<OrderEvent> {
        EventSink::new(Arc::new(self.orders.clone()))
    }

    pub fn position_sink(&self) -> EventSink<PositionEvent> {
        EventSink::new(Arc::new(self.positions.clone()))
    }

    pub fn market_data_sink(&self) -> EventSink<MarketDataEvent> {
        EventSink::new(Arc::new(self.market_data.clone()))
    }

    pub fn connectivity_sink(&self) -> EventSink<ConnectivityEvent> {
        EventSink::new(Arc::new(self.connectivity.clone()))
    }
}

/// A composed venue gateway
///
/// Built unstarted so consumers can subscribe before the first poll; call
/// [`Gateway::start`] once subscribed.
pub struct Gateway {
    venue: String,
    pair: CurrencyPair,
    order_entry: Arc<dyn OrderEntry>,
    positions: Arc<dyn PositionSource>,
    market_data: Arc<dyn MarketDataSource>,
    details: Arc<dyn ExchangeDetails>,
    streams: GatewayStreams,
}

impl Gateway {
    pub fn new(
        pair: CurrencyPair,
        order_entry: Arc<dyn OrderEntry>,
        positions: Arc<dyn PositionSource>,
        market_data: Arc<dyn MarketDataSource>,
        details: Arc<dyn ExchangeDetails>,
        streams: GatewayStreams,
    ) -> Self {
        Self {
            venue: details.name().to_string(),
            pair,
            order_entry,
            positions,
            market_data,
            details,
            streams,
        }
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn is_price_source(&self) -> bool {
        self.market_data.is_price_source()
    }

    pub fn order_entry(&self) -> Arc<dyn OrderEntry> {
        self.order_entry.clone()
    }

    pub fn positions(&self) -> Arc<dyn PositionSource> {
        self.positions.clone()
    }

    pub fn market_data(&self) -> Arc<dyn MarketDataSource> {
        self.market_data.clone()
    }

    pub fn details(&self) -> &dyn ExchangeDetails {
        self.details.as_ref()
    }

    pub fn subscribe_orders(&self) -> ChannelSubscriber<OrderEvent> {
        self.streams.orders.subscribe()
    }

    pub fn subscribe_positions(&self) -> ChannelSubscriber<PositionEvent> {
        self.streams.positions.subscribe()
    }

    pub fn subscribe_market_data(&self) -> ChannelSubscriber<MarketDataEvent> {
        self.streams.market_data.subscribe()
    }

    pub fn subscribe_connectivity(&self) -> ChannelSubscriber<ConnectivityEvent> {
        self.streams.connectivity.subscribe()
    }

    /// Arm every component's timers
    pub fn start(&self) {
        info!("Starting {} gateway for {}", self.venue, self.pair);
        self.order_entry.start();
        self.positions.start();
        self.market_data.start();
    }

    /// Stop every timer and silence every stream. Idempotent.
    pub async fn dispose(&self) {
        tokio::join!(
            self.order_entry.dispose(),
            self.positions.dispose(),
            self.market_data.dispose(),
        );
        info!("Disposed {} gateway for {}", self.venue, self.pair);
    }
}
