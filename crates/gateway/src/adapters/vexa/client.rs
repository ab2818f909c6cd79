//! Vexa REST contract
//!
//! The wire types mirror the venue's JSON field names. `success` is the only
//! failure signal the adapter reads from a response.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, TransportError};

/// Request/response collaborator for the Vexa REST API
///
/// Implementations own signing and HTTP; `Err` means the call never produced
/// a venue response.
#[async_trait]
pub trait VenueClient: Send + Sync {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<VenueResponse<CreatedOrder>, TransportError>;

    async fn cancel(
        &self,
        request: CancelOrderRequest,
    ) -> Result<VenueResponse<IgnoredAny>, TransportError>;

    async fn get_balance(
        &self,
        request: BalanceRequest,
    ) -> Result<VenueResponse<VenueBalance>, TransportError>;

    async fn get_order_books(
        &self,
        request: OrderBookRequest,
    ) -> Result<VenueResponse<VenueOrderBook>, TransportError>;

    async fn get_trades(
        &self,
        request: TradesRequest,
    ) -> Result<VenueResponse<Vec<VenueTrade>>, TransportError>;
}

// Requests

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    pub symbol: String,
    /// Side token, "BUY" or "SELL"
    #[serde(rename = "type")]
    pub side: String,
    pub amount: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelOrderRequest {
    #[serde(rename = "orderOid")]
    pub order_oid: String,
    #[serde(rename = "type")]
    pub side: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRequest {
    /// Lowercase currency code
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBookRequest {
    pub pair: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradesRequest {
    pub pair: String,
}

// Responses

/// Envelope around every venue reply
#[derive(Debug, Clone, Deserialize)]
pub struct VenueResponse<T> {
    /// Absent counts as failure
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    /// Venue time in epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> VenueResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            timestamp: None,
            msg: None,
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            timestamp: None,
            msg: Some(msg.into()),
        }
    }

    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    fn rejection(&self, operation: &'static str) -> GatewayError {
        GatewayError::VenueRejected {
            operation,
            reason: self
                .msg
                .clone()
                .unwrap_or_else(|| "success=false".to_string()),
        }
    }

    /// Check `success` only, discarding any payload
    pub fn into_ack(self, operation: &'static str) -> Result<(), GatewayError> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection(operation))
        }
    }

    /// Check `success` and take the payload
    pub fn into_data(self, operation: &'static str) -> Result<T, GatewayError> {
        if !self.success {
            return Err(self.rejection(operation));
        }
        self.data.ok_or(GatewayError::VenueRejected {
            operation,
            reason: "response carried no data".to_string(),
        })
    }
}

impl<T: DeserializeOwned> VenueResponse<T> {
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        serde_json::from_str(json).map_err(|e| TransportError::Request(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_oid: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueBalance {
    pub balance: Decimal,
    pub freeze_balance: Decimal,
}

/// Levels are `[price, amount, volume]`, best price first
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VenueOrderBook {
    #[serde(rename = "BUY", default)]
    pub buy: Vec<Vec<Decimal>>,
    #[serde(rename = "SELL", default)]
    pub sell: Vec<Vec<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueTrade {
    pub tid: u64,
    pub price: Decimal,
    pub amount: Decimal,
    /// Aggressor side token
    #[serde(rename = "type")]
    pub side: String,
    /// Epoch milliseconds
    pub date: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_wire_names() {
        let request = CreateOrderRequest {
            symbol: "btc_usdt".to_string(),
            side: "BUY".to_string(),
            amount: dec!(1.5),
            price: dec!(100),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "BUY");
        assert_eq!(json["symbol"], "btc_usdt");

        let cancel = CancelOrderRequest {
            order_oid: "abc".to_string(),
            side: "SELL".to_string(),
            symbol: "btc_usdt".to_string(),
        };
        let json = serde_json::to_value(&cancel).unwrap();
        assert_eq!(json["orderOid"], "abc");
        assert_eq!(json["type"], "SELL");
    }

    #[test]
    fn test_parse_order_book() {
        let json = r#"{
            "success": true,
            "timestamp": 1700000000123,
            "data": { "BUY": [[10, 2, 20]], "SELL": [["11", "1", "11"]] }
        }"#;
        let response = VenueResponse::<VenueOrderBook>::from_json(json).unwrap();
        assert_eq!(response.timestamp, Some(1_700_000_000_123));

        let book = response.into_data("get_order_books").unwrap();
        assert_eq!(book.buy, vec![vec![dec!(10), dec!(2), dec!(20)]]);
        assert_eq!(book.sell, vec![vec![dec!(11), dec!(1), dec!(11)]]);
    }

    #[test]
    fn test_parse_balance_and_order() {
        let balance = VenueResponse::<VenueBalance>::from_json(
            r#"{"success": true, "data": {"balance": 1.25, "freezeBalance": 0.5}}"#,
        )
        .unwrap()
        .into_data("get_balance")
        .unwrap();
        assert_eq!(balance.balance, dec!(1.25));
        assert_eq!(balance.freeze_balance, dec!(0.5));

        let order = VenueResponse::<CreatedOrder>::from_json(
            r#"{"success": true, "data": {"orderOid": "5f1e"}}"#,
        )
        .unwrap()
        .into_data("create_order")
        .unwrap();
        assert_eq!(order.order_oid, "5f1e");
    }

    #[test]
    fn test_missing_success_is_failure() {
        let response =
            VenueResponse::<IgnoredAny>::from_json(r#"{"data": {"anything": 1}}"#).unwrap();
        assert!(matches!(
            response.into_ack("cancel"),
            Err(GatewayError::VenueRejected { operation: "cancel", .. })
        ));
    }

    #[test]
    fn test_rejection_carries_venue_message() {
        let response = VenueResponse::<CreatedOrder>::failed("insufficient balance");
        match response.into_data("create_order") {
            Err(GatewayError::VenueRejected { reason, .. }) => {
                assert_eq!(reason, "insufficient balance")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_success_without_data_is_rejected() {
        let response = VenueResponse::<VenueBalance>::from_json(r#"{"success": true}"#).unwrap();
        assert!(response.into_data("get_balance").is_err());
    }

    #[test]
    fn test_parse_trades() {
        let json = r#"{"success": true, "data": [
            {"tid": 7, "price": "100.5", "amount": "0.1", "type": "SELL", "date": 1700000000000}
        ]}"#;
        let trades = VenueResponse::<Vec<VenueTrade>>::from_json(json)
            .unwrap()
            .into_data("get_trades")
            .unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].tid, 7);
        assert_eq!(trades[0].side, "SELL");
    }
}
