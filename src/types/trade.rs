//! Trade payload carried by fund-moving orders, and its fill tracker.
//!
//! ## Fill Tracking
//!
//! The filled amount is the only field of an order that changes after
//! stamping. It lives behind a reader/writer lock: readers run together,
//! a writer excludes everyone for the duration of one update. The lock is
//! never held across a call into other code.
//!
//! Overfill is not rejected here. The matching engine owns that boundary;
//! the tracker logs a warning when it sees one.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use super::ids::CoinId;
use super::order::Side;
use crate::error::OrderError;

/// Most coins a trade may carry; the serialized count is one byte.
pub const MAX_COINS: usize = u8::MAX as usize;

/// Trade details of an instant order.
///
/// ## Quantity Units
///
/// `quantity` is in atoms of the base asset, except for buy-side instant
/// orders where it is denominated in the quote asset.
///
/// ## Example
///
/// ```
/// use dex_orders::types::{CoinId, Side, Trade};
///
/// let trade = Trade::new(vec![CoinId(vec![1; 36])], Side::Sell, 10_000, "DsAddr").unwrap();
/// trade.add_fill(5);
/// trade.add_fill(3);
/// assert_eq!(trade.filled(), 8);
/// assert_eq!(trade.remaining(), 9_992);
/// ```
#[derive(Debug, Default)]
pub struct Trade {
    // At most MAX_COINS, all of the same asset.
    coins: Vec<CoinId>,

    /// Buy or sell
    pub side: Side,

    /// Ordered amount
    pub quantity: u64,

    /// Address where the counterparty sends funds
    pub address: String,

    // Not part of the serialization.
    filled: RwLock<u64>,
}

impl Trade {
    /// Create a trade with nothing filled.
    ///
    /// Fails with [`OrderError::TooManyCoins`] beyond [`MAX_COINS`].
    pub fn new(
        coins: Vec<CoinId>,
        side: Side,
        quantity: u64,
        address: impl Into<String>,
    ) -> Result<Self, OrderError> {
        check_coin_count(&coins)?;
        Ok(Self {
            coins,
            side,
            quantity,
            address: address.into(),
            filled: RwLock::new(0),
        })
    }

    /// Funding coins
    pub fn coins(&self) -> &[CoinId] {
        &self.coins
    }

    /// Replace the funding coins, subject to the same limit as [`Trade::new`].
    pub fn set_coins(&mut self, coins: Vec<CoinId>) -> Result<(), OrderError> {
        check_coin_count(&coins)?;
        self.coins = coins;
        Ok(())
    }

    /// True for the sell side
    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }

    /// The order's payment address
    pub fn swap_address(&self) -> &str {
        &self.address
    }

    // A panic while holding the lock cannot leave a u64 half-written.
    fn read(&self) -> RwLockReadGuard<'_, u64> {
        self.filled.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, u64> {
        self.filled.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unfilled amount. Saturates at zero on overfill.
    pub fn remaining(&self) -> u64 {
        self.quantity.saturating_sub(*self.read())
    }

    /// Filled amount
    pub fn filled(&self) -> u64 {
        *self.read()
    }

    /// True once nothing remains
    pub fn is_filled(&self) -> bool {
        self.remaining() == 0
    }

    /// Increase the filled amount by `amt`.
    pub fn add_fill(&self, amt: u64) {
        let filled = {
            let mut guard = self.write();
            *guard = guard.saturating_add(amt);
            *guard
        };
        self.check_overfill(filled);
    }

    /// Set the filled amount.
    pub fn set_fill(&self, amt: u64) {
        *self.write() = amt;
        self.check_overfill(amt);
    }

    fn check_overfill(&self, filled: u64) {
        if filled > self.quantity {
            warn!(
                filled,
                quantity = self.quantity,
                "trade filled beyond its quantity"
            );
        }
    }
}

fn check_coin_count(coins: &[CoinId]) -> Result<(), OrderError> {
    if coins.len() > MAX_COINS {
        return Err(OrderError::TooManyCoins {
            count: coins.len(),
            max: MAX_COINS,
        });
    }
    Ok(())
}

/// Snapshot copy: the clone starts from the current filled amount and is
/// tracked independently afterwards.
impl Clone for Trade {
    fn clone(&self) -> Self {
        Self {
            coins: self.coins.clone(),
            side: self.side,
            quantity: self.quantity,
            address: self.address.clone(),
            filled: RwLock::new(self.filled()),
        }
    }
}

impl PartialEq for Trade {
    fn eq(&self, other: &Self) -> bool {
        self.coins == other.coins
            && self.side == other.side
            && self.quantity == other.quantity
            && self.address == other.address
            && self.filled() == other.filled()
    }
}

impl Eq for Trade {}

// ============================================================================
// Unit Tests
// ============================================================================
