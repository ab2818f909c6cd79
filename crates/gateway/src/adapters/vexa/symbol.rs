use hermes_core::CurrencyPair;
use std::fmt;

/// Venue token for a traded pair, lowercase `base_quote`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VenueSymbol(String);

impl VenueSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives venue tokens from the configured pair
///
/// Built once per gateway and shared by every component, so all of them
/// address the venue with the same symbol.
#[derive(Debug, Clone)]
pub struct SymbolMapper {
    pair: CurrencyPair,
    symbol: VenueSymbol,
}

impl SymbolMapper {
    pub fn new(pair: CurrencyPair) -> Self {
        let symbol = Self::symbol_for(&pair);
        Self { pair, symbol }
    }

    /// Pure mapping from a pair to its venue token
    pub fn symbol_for(pair: &CurrencyPair) -> VenueSymbol {
        VenueSymbol(format!(
            "{}_{}",
            pair.base().to_lowercase(),
            pair.quote().to_lowercase()
        ))
    }

    /// Venue token for a single currency, used by balance queries
    pub fn currency_token(currency: &str) -> String {
        currency.to_lowercase()
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn symbol(&self) -> &VenueSymbol {
        &self.symbol
    }
}
