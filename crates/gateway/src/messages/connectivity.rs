//! Connectivity signals
//!
//! Gateways built on request/response polling have no session to watch, so
//! Connected is a weak liveness hint rather than real connection monitoring.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    Connected,
    Disconnected,
}

/// Which part of a gateway raised the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionChannel {
    OrderEntry,
    MarketData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityEvent {
    pub venue: String,
    pub channel: ConnectionChannel,
    pub status: ConnectivityStatus,
}

impl ConnectivityEvent {
    pub fn connected(venue: impl Into<String>, channel: ConnectionChannel) -> Self {
        Self {
            venue: venue.into(),
            channel,
            status: ConnectivityStatus::Connected,
        }
    }
}
