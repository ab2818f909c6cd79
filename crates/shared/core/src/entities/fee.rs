use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maker/taker fee rates charged by a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee for orders that add liquidity
    pub maker_fee: Decimal,
    /// Fee for orders that remove liquidity
    pub taker_fee: Decimal,
}

impl FeeSchedule {
    pub fn new(maker_fee: Decimal, taker_fee: Decimal) -> Self {
        Self {
            maker_fee,
            taker_fee,
        }
    }

    /// Same rate on both sides of the book
    pub fn flat(rate: Decimal) -> Self {
        Self::new(rate, rate)
    }

    /// Calculate fee for a trade
    pub fn calculate_fee(&self, notional: Decimal, is_maker: bool) -> Decimal {
        let rate = if is_maker {
            self.maker_fee
        } else {
            self.taker_fee
        };
        notional * rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_fee() {
        let schedule = FeeSchedule::new(dec!(0.001), dec!(0.002));
        assert_eq!(schedule.calculate_fee(dec!(10000), true), dec!(10));
        assert_eq!(schedule.calculate_fee(dec!(10000), false), dec!(20));
    }

    #[test]
    fn test_flat() {
        let schedule = FeeSchedule::flat(dec!(0.002));
        assert_eq!(schedule.maker_fee, schedule.taker_fee);
    }
}
