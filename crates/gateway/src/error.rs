//! Error types for the gateway crate

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::ConfigError;

/// Transport-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Channel closed")]
    ChannelClosed,

    #[error("Timeout waiting for response")]
    Timeout,
}

/// Gateway-level errors (adapter operations)
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Rejected before any network call; the venue has no equivalent
    #[error("{venue} does not support {feature}")]
    Unsupported {
        venue: &'static str,
        feature: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Programming error: a side token outside the venue's two-token set
    #[error("Unmapped side token: {0:?}")]
    SideMapping(String),

    /// Scaling a price by a configured factor left the decimal range
    #[error("Price {price} scaled by {factor} is out of range")]
    PriceOutOfRange { price: Decimal, factor: Decimal },

    #[error("Venue rejected {operation}: {reason}")]
    VenueRejected {
        operation: &'static str,
        reason: String,
    },
}

impl GatewayError {
    pub fn unsupported(venue: &'static str, feature: impl Into<String>) -> Self {
        GatewayError::Unsupported {
            venue,
            feature: feature.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
