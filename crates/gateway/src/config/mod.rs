pub mod loader;
pub mod types;

pub use loader::{ConfigError, load_config, load_config_from_str};
pub use types::{ConnectivityPolicy, DetailsConfig, GatewayConfig, PollingConfig, PricingConfig};
