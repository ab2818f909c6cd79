//! Order outcome events

use hermes_core::ClientOrderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which command produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderAction {
    Send,
    Cancel,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Cancel => "cancel",
        }
    }
}

/// Venue acknowledged a send or cancel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub client_order_id: ClientOrderId,
    /// Venue-assigned id; only present on send acknowledgements
    pub external_id: Option<String>,
    /// Time from request creation to emission of this update
    pub latency: Duration,
}

/// Venue refused a send or cancel, or the request never reached it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejection {
    pub client_order_id: ClientOrderId,
    pub action: OrderAction,
    pub reason: String,
    pub latency: Duration,
}

/// Exactly one of these is published per send/cancel attempt that reaches the venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    Accepted(OrderUpdate),
    Cancelled(OrderUpdate),
    Rejected(OrderRejection),
}

impl OrderEvent {
    pub fn client_order_id(&self) -> &str {
        match self {
            Self::Accepted(update) | Self::Cancelled(update) => &update.client_order_id,
            Self::Rejected(rejection) => &rejection.client_order_id,
        }
    }

    pub fn latency(&self) -> Duration {
        match self {
            Self::Accepted(update) | Self::Cancelled(update) => update.latency,
            Self::Rejected(rejection) => rejection.latency,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let accepted = OrderEvent::Accepted(OrderUpdate {
            client_order_id: "client-1".to_string(),
            external_id: Some("ext-1".to_string()),
            latency: Duration::from_millis(5),
        });
        assert_eq!(accepted.client_order_id(), "client-1");
        assert_eq!(accepted.latency(), Duration::from_millis(5));
        assert!(!accepted.is_rejection());

        let rejected = OrderEvent::Rejected(OrderRejection {
            client_order_id: "client-2".to_string(),
            action: OrderAction::Cancel,
            reason: "unknown order".to_string(),
            latency: Duration::from_millis(7),
        });
        assert_eq!(rejected.client_order_id(), "client-2");
        assert!(rejected.is_rejection());
    }
}
