use serde::{Deserialize, Serialize};

/// Time-in-force instructions for order validity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good Till Canceled: order rests until explicitly canceled
    #[default]
    GTC,

    /// Immediate or Cancel: execute immediately (partially or fully) and cancel unfilled portion
    IOC,

    /// Fill or Kill: execute immediately and completely, or cancel entire order
    FOK,
}

impl TimeInForce {
    /// Returns true if the order must not rest on the book
    pub fn is_immediate(&self) -> bool {
        matches!(self, TimeInForce::IOC | TimeInForce::FOK)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GTC => "gtc",
            TimeInForce::IOC => "ioc",
            TimeInForce::FOK => "fok",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate() {
        assert!(!TimeInForce::GTC.is_immediate());
        assert!(TimeInForce::IOC.is_immediate());
        assert!(TimeInForce::FOK.is_immediate());
        assert_eq!(TimeInForce::default(), TimeInForce::GTC);
    }
}
