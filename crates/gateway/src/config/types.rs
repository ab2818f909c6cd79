use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Configuration for one venue gateway trading one pair
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API key for authentication
    #[serde(default)]
    pub api_key: String,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: String,
    /// Traded pair, e.g. "BTC/USDT"
    pub pair: String,
    /// Whether this gateway is the authoritative market data source for the pair
    #[serde(default = "default_true")]
    pub is_price_source: bool,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub details: DetailsConfig,
    #[serde(default)]
    pub connectivity: ConnectivityPolicy,
    /// Capacity of each event channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl GatewayConfig {
    /// Minimal config for a pair with every other field defaulted
    pub fn for_pair(pair: impl Into<String>) -> Self {
        GatewayConfig {
            api_key: String::new(),
            api_secret: String::new(),
            pair: pair.into(),
            is_price_source: true,
            polling: PollingConfig::default(),
            pricing: PricingConfig::default(),
            details: DetailsConfig::default(),
            connectivity: ConnectivityPolicy::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

// Keeps the secret out of logs
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("pair", &self.pair)
            .field("is_price_source", &self.is_price_source)
            .field("polling", &self.polling)
            .field("pricing", &self.pricing)
            .field("details", &self.details)
            .field("connectivity", &self.connectivity)
            .field("channel_capacity", &self.channel_capacity)
            .finish()
    }
}

/// Polling cadences, one interval per feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay before order entry reports Connected
    #[serde(default = "default_connect_delay")]
    pub connect_delay_ms: u64,
    #[serde(default = "default_position_initial_delay")]
    pub position_initial_delay_ms: u64,
    #[serde(default = "default_position_interval")]
    pub position_interval_ms: u64,
    #[serde(default = "default_book_interval")]
    pub book_interval_ms: u64,
    #[serde(default = "default_trade_interval")]
    pub trade_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        PollingConfig {
            connect_delay_ms: default_connect_delay(),
            position_initial_delay_ms: default_position_initial_delay(),
            position_interval_ms: default_position_interval(),
            book_interval_ms: default_book_interval(),
            trade_interval_ms: default_trade_interval(),
        }
    }
}

impl PollingConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn position_initial_delay(&self) -> Duration {
        Duration::from_millis(self.position_initial_delay_ms)
    }

    pub fn position_interval(&self) -> Duration {
        Duration::from_millis(self.position_interval_ms)
    }

    pub fn book_interval(&self) -> Duration {
        Duration::from_millis(self.book_interval_ms)
    }

    pub fn trade_interval(&self) -> Duration {
        Duration::from_millis(self.trade_interval_ms)
    }
}

/// Price normalization between the engine's unit and the venue's
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Applied to every price read from the venue (book levels, trades)
    #[serde(default = "default_one")]
    pub book_price_multiplier: Decimal,
    /// Applied to order prices sent to the venue: buy / factor, sell * factor
    #[serde(default = "default_one")]
    pub order_price_factor: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            book_price_multiplier: default_one(),
            order_price_factor: default_one(),
        }
    }
}

/// Static venue metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsConfig {
    #[serde(default = "default_fee_rate")]
    pub maker_fee: Decimal,
    #[serde(default = "default_fee_rate")]
    pub taker_fee: Decimal,
    /// Minimum price increment
    #[serde(default = "default_tick_size")]
    pub tick_size: Decimal,
}

impl Default for DetailsConfig {
    fn default() -> Self {
        DetailsConfig {
            maker_fee: default_fee_rate(),
            taker_fee: default_fee_rate(),
            tick_size: default_tick_size(),
        }
    }
}

/// When market data polling reports Connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityPolicy {
    /// On every refresh attempt, whatever its outcome
    #[default]
    OnAttempt,
    /// Only after a successful venue response
    OnSuccess,
}

fn default_true() -> bool {
    true
}

fn default_one() -> Decimal {
    Decimal::ONE
}

fn default_fee_rate() -> Decimal {
    Decimal::new(2, 3) // 0.2%
}

fn default_tick_size() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_channel_capacity() -> usize {
    1024
}

fn default_connect_delay() -> u64 {
    100
}

fn default_position_initial_delay() -> u64 {
    1_000
}

fn default_position_interval() -> u64 {
    5_000
}

fn default_book_interval() -> u64 {
    1_000
}

fn default_trade_interval() -> u64 {
    1_000
}
