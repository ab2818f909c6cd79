//! Venue adapters
//!
//! An adapter translates one venue's request/response dialect into the
//! engine-facing ports and event streams.

pub mod noop;
pub mod vexa;

pub use noop::NoopMarketData;
pub use vexa::VexaGatewayComposer;
