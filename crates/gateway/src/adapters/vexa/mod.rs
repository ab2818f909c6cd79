//! Vexa REST venue
//!
//! Vexa has no streaming API: orders go out as single requests and balances,
//! books and trades are polled on fixed intervals.

pub mod client;
pub mod composer;
pub mod details;
pub mod market_data;
pub mod order_entry;
pub mod positions;
pub mod pricing;
pub mod side;
pub mod symbol;

/// Venue name used in subjects, logs and connectivity events
pub const VENUE: &str = "vexa";

pub use client::VenueClient;
pub use composer::VexaGatewayComposer;
pub use details::VexaExchangeDetails;
pub use market_data::{FeedIntervals, VexaMarketData};
pub use order_entry::VexaOrderEntry;
pub use positions::VexaPositionPoller;
pub use pricing::PriceScaling;
pub use side::SideMapper;
pub use symbol::{SymbolMapper, VenueSymbol};
