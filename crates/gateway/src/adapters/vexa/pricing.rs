use hermes_core::{Price, Side};
use rust_decimal::Decimal;

use crate::config::{ConfigError, PricingConfig};
use crate::error::GatewayError;

/// Price normalization between engine units and venue units
///
/// Reads (book levels, trades) are multiplied by the book multiplier. Writes
/// (order prices) are divided by the order factor on the buy side and
/// multiplied by it on the sell side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceScaling {
    book_multiplier: Decimal,
    order_factor: Decimal,
}

impl PriceScaling {
    pub fn new(config: &PricingConfig) -> Result<Self, ConfigError> {
        if config.book_price_multiplier <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveFactor("book_price_multiplier"));
        }
        if config.order_price_factor <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveFactor("order_price_factor"));
        }
        Ok(Self {
            book_multiplier: config.book_price_multiplier,
            order_factor: config.order_price_factor,
        })
    }

    pub fn identity() -> Self {
        Self {
            book_multiplier: Decimal::ONE,
            order_factor: Decimal::ONE,
        }
    }

    /// Venue price to engine price
    pub fn read(&self, venue_price: Price) -> Result<Price, GatewayError> {
        venue_price
            .checked_mul(self.book_multiplier)
            .ok_or(GatewayError::PriceOutOfRange {
                price: venue_price,
                factor: self.book_multiplier,
            })
    }

    /// Engine order price to venue price
    pub fn write(&self, side: Side, price: Price) -> Result<Price, GatewayError> {
        let scaled = match side {
            Side::Buy => price.checked_div(self.order_factor),
            Side::Sell => price.checked_mul(self.order_factor),
        };
        scaled.ok_or(GatewayError::PriceOutOfRange {
            price,
            factor: self.order_factor,
        })
    }
}

impl Default for PriceScaling {
    fn default() -> Self {
        Self::identity()
    }
}
