//! Hermes Gateway
//!
//! Venue gateways for the Hermes trading engine. Provides:
//! - Transport abstraction (tokio broadcast channels, one per event stream)
//! - Event messages for orders, positions, market data and connectivity
//! - Engine-facing ports (`OrderEntry`, `PositionSource`, `MarketDataSource`,
//!   `ExchangeDetails`)
//! - Venue adapters (Vexa REST)
//!
//! ## Architecture
//!
//! ```text
//!        Venue REST API
//!              │ VenueClient
//!    ┌─────────▼──────────┐
//!    │  Adapter           │  order entry / position poller /
//!    │  (timers + mapping)│  market data poller
//!    └─────────┬──────────┘
//!              │ Channels:
//!              │ orders.{venue}, positions.{venue}.{ccy},
//!              │ md.{symbol}, trades.{symbol}, control.connectivity.{venue}
//!    ┌─────────▼──────────┐
//!    │  Trading engine    │
//!    └────────────────────┘
//! ```
//!
//! Commands return `Err` only when refused before reaching the venue. Every
//! venue outcome, success or failure, arrives as an event.

pub mod adapters;
pub mod config;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod ports;
pub mod schedule;
pub mod transport;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

// Re-export commonly used types
pub use adapters::vexa::{VenueClient, VexaGatewayComposer};
pub use config::{ConfigError, ConnectivityPolicy, GatewayConfig, load_config, load_config_from_str};
pub use error::{GatewayError, Result, TransportError};
pub use gateway::{Gateway, GatewayStreams};
pub use messages::{
    BookLevel, BookSnapshot, ConnectionChannel, ConnectivityEvent, ConnectivityStatus, Feed,
    MarketDataEvent, OrderAction, OrderEvent, OrderRejection, OrderUpdate, PositionEvent,
    TradeMessage,
};
pub use ports::{ExchangeDetails, Lifecycle, MarketDataSource, OrderEntry, PositionSource};
pub use transport::{
    EventSink, Publisher, Subjects, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
};
