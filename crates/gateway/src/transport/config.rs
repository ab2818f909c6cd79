//! Transport configuration

/// Subjects for logical message routing
///
/// Even with tokio channels, we use logical subject names for:
/// - Clear message categorization
/// - Easy migration to distributed transports later
/// - Debugging and logging
pub struct Subjects;

impl Subjects {
    // Market Data (Venue → Engine)

    /// Order book snapshots for a venue symbol: `md.btc_usdt`
    pub fn market_data(symbol: &str) -> String {
        format!("md.{}", symbol)
    }

    /// Trade prints for a venue symbol: `trades.btc_usdt`
    pub fn trades(symbol: &str) -> String {
        format!("trades.{}", symbol)
    }

    // Account (Venue → Engine)

    /// Balance updates for one currency: `positions.vexa.BTC`
    pub fn positions(venue: &str, currency: &str) -> String {
        format!("positions.{}.{}", venue, currency)
    }

    // Orders (Engine → Venue → Engine)

    /// Order outcomes from a venue: `orders.vexa`
    pub fn order_events(venue: &str) -> String {
        format!("orders.{}", venue)
    }

    // Control

    /// Connectivity signals from a venue: `control.connectivity.vexa`
    pub fn connectivity(venue: &str) -> String {
        format!("control.connectivity.{}", venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects() {
        assert_eq!(Subjects::market_data("btc_usdt"), "md.btc_usdt");
        assert_eq!(Subjects::trades("eth_usdt"), "trades.eth_usdt");
        assert_eq!(Subjects::positions("vexa", "BTC"), "positions.vexa.BTC");
        assert_eq!(Subjects::order_events("vexa"), "orders.vexa");
        assert_eq!(
            Subjects::connectivity("vexa"),
            "control.connectivity.vexa"
        );
    }
}
