//! Asset symbols, market names and market parameters.
//!
//! The symbol table is read-only after construction and is passed to the
//! naming functions explicitly.
//!
//! ## Example
//!
//! ```
//! use dex_orders::market::AssetRegistry;
//!
//! let assets = AssetRegistry::new([(42, "DCR"), (0, "BTC")]).unwrap();
//! assert_eq!(assets.market_name(42, 0).unwrap(), "dcr_btc");
//! assert!(assets.market_name(42, 7).is_err());
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::OrderError;

/// Map from integer asset codes to symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRegistry {
    symbols: HashMap<u32, String>,
}

impl AssetRegistry {
    /// Build a registry. Symbols are stored lowercase; duplicate codes or
    /// symbols are rejected.
    pub fn new<I, S>(assets: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        let mut symbols: HashMap<u32, String> = HashMap::new();
        for (id, symbol) in assets {
            let symbol = symbol.as_ref().trim().to_lowercase();
            if symbol.is_empty() {
                return Err(OrderError::Config(format!("asset {} has an empty symbol", id)));
            }
            if symbols.values().any(|s| *s == symbol) {
                return Err(OrderError::Config(format!("duplicate asset symbol {}", symbol)));
            }
            if symbols.insert(id, symbol).is_some() {
                return Err(OrderError::Config(format!("duplicate asset id {}", id)));
            }
        }
        Ok(Self { symbols })
    }

    /// Lowercase symbol for an asset code
    pub fn symbol(&self, id: u32) -> Option<&str> {
        self.symbols.get(&id).map(String::as_str)
    }

    /// Number of registered assets
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if no assets are registered
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Market name `"<base>_<quote>"`, lowercase.
    pub fn market_name(&self, base: u32, quote: u32) -> Result<String, OrderError> {
        let base_symbol = self
            .symbol(base)
            .ok_or(OrderError::AssetNotFound { role: "base", id: base })?;
        let quote_symbol = self
            .symbol(quote)
            .ok_or(OrderError::AssetNotFound { role: "quote", id: quote })?;
        Ok(format!("{}_{}", base_symbol, quote_symbol))
    }
}

/// Parameters of one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketInfo {
    /// Market name, e.g. "dcr_btc"
    pub name: String,
    /// Base asset code
    pub base: u32,
    /// Quote asset code
    pub quote: u32,
    /// Minimum tradable increment of the base asset
    pub lot_size: u64,
    /// Epoch length in milliseconds
    pub epoch_duration: u64,
    /// Multiple of one lot's cost a market buy must exceed
    pub market_buy_buffer: Decimal,
    /// Cancel orders allowed per user per epoch
    pub max_user_cancels_per_epoch: u32,
    /// Lots a user may have booked
    pub booked_lot_limit: u32,
}

impl MarketInfo {
    /// Create a market with unlimited cancel and booked-lot limits.
    pub fn new(
        assets: &AssetRegistry,
        base: u32,
        quote: u32,
        lot_size: u64,
        epoch_duration: u64,
        market_buy_buffer: Decimal,
    ) -> Result<Self, OrderError> {
        let name = assets.market_name(base, quote)?;
        Ok(Self {
            name,
            base,
            quote,
            lot_size,
            epoch_duration,
            market_buy_buffer,
            max_user_cancels_per_epoch: u32::MAX,
            booked_lot_limit: u32::MAX,
        })
    }
}
