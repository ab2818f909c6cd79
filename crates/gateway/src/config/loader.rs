use hermes_core::{CurrencyPair, PairParseError};
use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;

use super::types::GatewayConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Unresolvable currency pair: {0}")]
    InvalidPair(#[from] PairParseError),
    #[error("Interval {0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("Price factor {0} must be greater than zero")]
    NonPositiveFactor(&'static str),
    #[error("Channel capacity must be greater than zero")]
    ZeroCapacity,
}

/// Load gateway configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = serde_json::from_str(json)?;
    Ok(config)
}

impl GatewayConfig {
    /// Resolve the configured pair into base and quote currencies
    pub fn currency_pair(&self) -> Result<CurrencyPair, ConfigError> {
        Ok(self.pair.parse()?)
    }

    /// Validate the configuration, returning the resolved pair
    pub fn validate(&self) -> Result<CurrencyPair, ConfigError> {
        let pair = self.currency_pair()?;

        let intervals = [
            ("position_interval_ms", self.polling.position_interval_ms),
            ("book_interval_ms", self.polling.book_interval_ms),
            ("trade_interval_ms", self.polling.trade_interval_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ZeroInterval(*name));
        }

        if self.pricing.book_price_multiplier <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveFactor("book_price_multiplier"));
        }
        if self.pricing.order_price_factor <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveFactor("order_price_factor"));
        }

        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectivityPolicy;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{ "pair": "BTC/USDT" }"#).unwrap();

        assert!(config.is_price_source);
        assert_eq!(config.polling.connect_delay(), Duration::from_millis(100));
        assert_eq!(config.polling.position_interval(), Duration::from_secs(5));
        assert_eq!(config.pricing.book_price_multiplier, dec!(1));
        assert_eq!(config.details.maker_fee, dec!(0.002));
        assert_eq!(config.connectivity, ConnectivityPolicy::OnAttempt);

        let pair = config.validate().unwrap();
        assert_eq!(pair.base(), "BTC");
        assert_eq!(pair.quote(), "USDT");
    }

    #[test]
    fn test_load_full_config() {
        let json = r#"{
            "api_key": "key",
            "api_secret": "secret",
            "pair": "eth-btc",
            "is_price_source": false,
            "polling": { "book_interval_ms": 250, "trade_interval_ms": 500 },
            "pricing": { "book_price_multiplier": "100", "order_price_factor": 1.01 },
            "details": { "tick_size": "0.00001" },
            "connectivity": "on_success",
            "channel_capacity": 64
        }"#;
        let config = load_config_from_str(json).unwrap();

        assert!(!config.is_price_source);
        assert_eq!(config.polling.book_interval(), Duration::from_millis(250));
        assert_eq!(config.pricing.book_price_multiplier, dec!(100));
        assert_eq!(config.pricing.order_price_factor, dec!(1.01));
        assert_eq!(config.details.tick_size, dec!(0.00001));
        assert_eq!(config.connectivity, ConnectivityPolicy::OnSuccess);
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.validate().unwrap().to_string(), "ETH/BTC");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = GatewayConfig::for_pair("BTC/USDT");
        config.api_secret = "hunter2".to_string();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for pair in ["BTC", "BTC/BTC", "BTC/USDT/ETH"] {
            let config = GatewayConfig::for_pair(pair);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidPair(_))));
        }

        let mut config = GatewayConfig::for_pair("BTC/USDT");
        config.polling.book_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroInterval("book_interval_ms"))
        ));

        let mut config = GatewayConfig::for_pair("BTC/USDT");
        config.pricing.order_price_factor = dec!(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveFactor("order_price_factor"))
        ));

        let mut config = GatewayConfig::for_pair("BTC/USDT");
        config.channel_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/hermes.json"),
            Err(ConfigError::IoError(_))
        ));
    }
}
