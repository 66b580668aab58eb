//! Static asset and market configuration.
//!
//! Loaded once at startup. Produces the immutable [`AssetRegistry`] and the
//! [`MarketInfo`] set used by validation.
//!
//! ## Format
//!
//! ```json
//! {
//!   "assets": [{ "id": 42, "symbol": "dcr" }, { "id": 0, "symbol": "btc" }],
//!   "markets": [{
//!     "base": 42, "quote": 0,
//!     "lot_size": 100000000, "epoch_duration_ms": 10000,
//!     "market_buy_buffer": "1.5"
//!   }]
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::error::OrderError;
use crate::market::{AssetRegistry, MarketInfo};

/// One asset entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetConfig {
    /// Integer asset code
    pub id: u32,
    /// Ticker symbol, any case
    pub symbol: String,
}

/// One market entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketConfig {
    /// Base asset code
    pub base: u32,
    /// Quote asset code
    pub quote: u32,
    /// Lot size in base atoms
    pub lot_size: u64,
    /// Epoch length (ms)
    pub epoch_duration_ms: u64,
    /// Market-buy buffer, at least 1
    pub market_buy_buffer: Decimal,
    /// Defaults to unlimited
    #[serde(default)]
    pub max_user_cancels_per_epoch: Option<u32>,
    /// Defaults to unlimited
    #[serde(default)]
    pub booked_lot_limit: Option<u32>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DexConfig {
    /// Known assets
    pub assets: Vec<AssetConfig>,
    /// Markets to serve
    #[serde(default)]
    pub markets: Vec<MarketConfig>,
}

/// Assets and markets ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markets {
    /// Symbol table
    pub assets: AssetRegistry,
    /// Market parameters, in configuration order
    pub markets: Vec<MarketInfo>,
}

impl Markets {
    /// Find a market by name.
    pub fn get(&self, name: &str) -> Option<&MarketInfo> {
        self.markets.iter().find(|m| m.name == name)
    }

    /// Find a market by asset pair.
    pub fn by_assets(&self, base: u32, quote: u32) -> Option<&MarketInfo> {
        self.markets.iter().find(|m| m.base == base && m.quote == quote)
    }
}

impl DexConfig {
    /// Parse from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, OrderError> {
        serde_json::from_str(s).map_err(|e| OrderError::Config(e.to_string()))
    }

    /// Check the configuration and build the registry and markets.
    pub fn build(&self) -> Result<Markets, OrderError> {
        let assets = AssetRegistry::new(self.assets.iter().map(|a| (a.id, a.symbol.as_str())))?;

        let mut markets: Vec<MarketInfo> = Vec::with_capacity(self.markets.len());
        for m in &self.markets {
            if m.base == m.quote {
                return Err(OrderError::Config(format!(
                    "market base and quote are both asset {}",
                    m.base
                )));
            }
            if m.lot_size == 0 {
                return Err(OrderError::Config(format!(
                    "market {}/{} has zero lot size",
                    m.base, m.quote
                )));
            }
            if m.market_buy_buffer < Decimal::ONE {
                return Err(OrderError::Config(format!(
                    "market {}/{} buy buffer {} is below 1",
                    m.base, m.quote, m.market_buy_buffer
                )));
            }

            let mut info = MarketInfo::new(
                &assets,
                m.base,
                m.quote,
                m.lot_size,
                m.epoch_duration_ms,
                m.market_buy_buffer,
            )?;
            if markets.iter().any(|x| x.name == info.name) {
                return Err(OrderError::Config(format!("duplicate market {}", info.name)));
            }
            if let Some(limit) = m.max_user_cancels_per_epoch {
                info.max_user_cancels_per_epoch = limit;
            }
            if let Some(limit) = m.booked_lot_limit {
                info.booked_lot_limit = limit;
            }
            markets.push(info);
        }

        info!(
            assets = assets.len(),
            markets = markets.len(),
            "loaded market configuration"
        );
        Ok(Markets { assets, markets })
    }
}
