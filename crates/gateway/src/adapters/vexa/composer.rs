use std::sync::Arc;

use log::info;

use super::VENUE;
use super::client::VenueClient;
use super::details::VexaExchangeDetails;
use super::market_data::{FeedIntervals, VexaMarketData};
use super::order_entry::VexaOrderEntry;
use super::positions::VexaPositionPoller;
use super::pricing::PriceScaling;
use super::symbol::SymbolMapper;
use crate::adapters::noop::NoopMarketData;
use crate::config::GatewayConfig;
use crate::error::Result;
use crate::gateway::{Gateway, GatewayStreams};
use crate::ports::MarketDataSource;

/// Assembles a Vexa [`Gateway`] for one pair
pub struct VexaGatewayComposer {
    config: GatewayConfig,
    client: Arc<dyn VenueClient>,
}

impl VexaGatewayComposer {
    pub fn new(config: GatewayConfig, client: Arc<dyn VenueClient>) -> Self {
        Self { config, client }
    }

    /// Validate the config and build every component, unstarted.
    ///
    /// Fails with `InvalidConfig` before any task is spawned or request made.
    pub fn build(&self) -> Result<Gateway> {
        let pair = self.config.validate()?;
        let pricing = PriceScaling::new(&self.config.pricing)?;
        let polling = &self.config.polling;

        let symbols = Arc::new(SymbolMapper::new(pair.clone()));
        let streams = GatewayStreams::new(self.config.channel_capacity);
        info!(
            "Composing {} gateway for {} as {}",
            VENUE,
            pair,
            symbols.symbol()
        );

        let order_entry = Arc::new(VexaOrderEntry::new(
            self.client.clone(),
            symbols.clone(),
            pricing,
            streams.order_sink(),
            streams.connectivity_sink(),
            polling.connect_delay(),
        ));

        let positions = Arc::new(VexaPositionPoller::new(
            self.client.clone(),
            symbols.clone(),
            streams.position_sink(),
            polling.position_initial_delay(),
            polling.position_interval(),
        ));

        let market_data: Arc<dyn MarketDataSource> = if self.config.is_price_source {
            Arc::new(VexaMarketData::new(
                self.client.clone(),
                symbols,
                pricing,
                self.config.connectivity,
                streams.market_data_sink(),
                streams.connectivity_sink(),
                FeedIntervals {
                    book: polling.book_interval(),
                    trades: polling.trade_interval(),
                },
            ))
        } else {
            info!("{} is not the price source for {}", VENUE, pair);
            Arc::new(NoopMarketData::new())
        };

        let details = Arc::new(VexaExchangeDetails::new(&self.config.details));

        Ok(Gateway::new(
            pair,
            order_entry,
            positions,
            market_data,
            details,
            streams,
        ))
    }

    /// Build and start
    pub fn launch(&self) -> Result<Gateway> {
        let gateway = self.build()?;
        gateway.start();
        Ok(gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::GatewayError;
    use crate::testkit::{ScriptedVenue, test_config};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_unresolvable_pair_fails_before_any_call() {
        let venue = Arc::new(ScriptedVenue::new());
        let composer = VexaGatewayComposer::new(test_config("BTC"), venue.clone());

        let result = composer.launch();
        assert!(matches!(
            result,
            Err(GatewayError::InvalidConfig(ConfigError::InvalidPair(_)))
        ));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(venue.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let mut config = test_config("BTC/USDT");
        config.polling.trade_interval_ms = 0;
        let composer = VexaGatewayComposer::new(config, Arc::new(ScriptedVenue::new()));

        assert!(matches!(
            composer.build(),
            Err(GatewayError::InvalidConfig(ConfigError::ZeroInterval(_)))
        ));
    }

    #[tokio::test]
    async fn test_price_source_switch() {
        let venue = Arc::new(ScriptedVenue::new());
        let gateway = VexaGatewayComposer::new(test_config("BTC/USDT"), venue.clone())
            .build()
            .unwrap();
        assert!(gateway.is_price_source());
        assert_eq!(gateway.venue(), "vexa");

        let mut config = test_config("BTC/USDT");
        config.is_price_source = false;
        let gateway = VexaGatewayComposer::new(config, venue).build().unwrap();
        assert!(!gateway.is_price_source());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_price_source_never_polls_market_data() {
        let venue = Arc::new(ScriptedVenue::new());
        let mut config = test_config("BTC/USDT");
        config.is_price_source = false;
        let gateway = VexaGatewayComposer::new(config, venue.clone())
            .launch()
            .unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        gateway.dispose().await;

        // only balance queries went out
        assert!(venue.call_count() > 0);
        assert_eq!(venue.balance_queries().len(), venue.call_count());
    }
}
