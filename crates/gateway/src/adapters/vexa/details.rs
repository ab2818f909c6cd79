use hermes_core::{FeeSchedule, Price};

use super::VENUE;
use crate::config::DetailsConfig;
use crate::ports::ExchangeDetails;

/// Static Vexa metadata
#[derive(Debug, Clone)]
pub struct VexaExchangeDetails {
    fees: FeeSchedule,
    tick_size: Price,
}

impl VexaExchangeDetails {
    pub fn new(config: &DetailsConfig) -> Self {
        Self {
            fees: FeeSchedule::new(config.maker_fee, config.taker_fee),
            tick_size: config.tick_size,
        }
    }
}

impl ExchangeDetails for VexaExchangeDetails {
    fn name(&self) -> &str {
        VENUE
    }

    fn fee_schedule(&self) -> FeeSchedule {
        self.fees
    }

    fn tick_size(&self) -> Price {
        self.tick_size
    }

    fn supports_self_trade_prevention(&self) -> bool {
        false
    }

    fn supports_cancel_all(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let details = VexaExchangeDetails::new(&DetailsConfig::default());
        assert_eq!(details.name(), "vexa");
        assert_eq!(details.fee_schedule(), FeeSchedule::flat(dec!(0.002)));
        assert_eq!(details.tick_size(), dec!(0.01));
        assert!(!details.supports_self_trade_prevention());
        assert!(!details.supports_cancel_all());
    }

    #[test]
    fn test_configured_tick_size() {
        let config = DetailsConfig {
            tick_size: dec!(0.0001),
            ..DetailsConfig::default()
        };
        assert_eq!(VexaExchangeDetails::new(&config).tick_size(), dec!(0.0001));
    }
}
