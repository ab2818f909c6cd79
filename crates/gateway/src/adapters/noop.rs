use async_trait::async_trait;
use log::debug;

use crate::ports::{Lifecycle, MarketDataSource};

/// Market data for a pair this gateway is not the price source for.
/// Publishes nothing and never touches the venue.
#[derive(Debug, Default)]
pub struct NoopMarketData;

impl NoopMarketData {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Lifecycle for NoopMarketData {
    fn start(&self) {
        debug!("Not a price source, market data polling skipped");
    }

    async fn dispose(&self) {}
}

#[async_trait]
impl MarketDataSource for NoopMarketData {
    fn is_price_source(&self) -> bool {
        false
    }

    async fn poll_book_once(&self) {}

    async fn poll_trades_once(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_is_not_price_source() {
        let source = NoopMarketData::new();
        source.start();
        source.poll_book_once().await;
        source.poll_trades_once().await;
        source.dispose().await;
        assert!(!source.is_price_source());
    }
}
