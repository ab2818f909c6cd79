use hermes_core::Side;

use crate::error::{GatewayError, Result};

const BUY: &str = "BUY";
const SELL: &str = "SELL";

/// Bijection between [`Side`] and the venue's side tokens
pub struct SideMapper;

impl SideMapper {
    pub fn to_venue(side: Side) -> &'static str {
        match side {
            Side::Buy => BUY,
            Side::Sell => SELL,
        }
    }

    /// Strict: any token other than "BUY" or "SELL" is a mapping error
    pub fn from_venue(token: &str) -> Result<Side> {
        match token {
            BUY => Ok(Side::Buy),
            SELL => Ok(Side::Sell),
            other => Err(GatewayError::SideMapping(other.to_string())),
        }
    }
}
