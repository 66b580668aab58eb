//! Order variants and the identifier deriver.
//!
//! ## Variants
//!
//! [`Order`] is a closed sum over [`InstantOrder`] and [`CancelOrder`].
//! Both embed a [`Prefix`]; only the instant order carries a [`Trade`].
//! Adding a variant means adding a case and fixing every exhaustive match.
//!
//! ## Identity
//!
//! An order's ID is the SHA-256 hash of its serialization. It is undefined
//! until the server stamps the order, then cached in the prefix. Re-stamping
//! needs `&mut`, so it can never race a reader, and it drops the cache.
//! So does every other mutable accessor, which keeps the cached ID equal
//! to the hash of the current fields.

use std::fmt;
use std::sync::OnceLock;
use std::time::SystemTime;

use tracing::trace;

use super::commit::Commitment;
use super::encode::unix_millis;
use super::ids::{hash256, AccountId, OrderId};
use super::trade::Trade;
use crate::error::OrderError;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Serialized as one byte:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order
    #[default]
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Order-type tag stored in the prefix.
///
/// The tag is data: a prefix may carry a tag that disagrees with its
/// variant, which the validator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Unset
    #[default]
    Unknown,
    /// Immediately resolved order
    Instant,
    /// Cancellation of a prior order
    Cancel,
}

impl OrderType {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Unknown => 0,
            OrderType::Instant => 1,
            OrderType::Cancel => 2,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::Unknown),
            1 => Some(OrderType::Instant),
            2 => Some(OrderType::Cancel),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Unknown => "unknown",
            OrderType::Instant => "instant",
            OrderType::Cancel => "cancel",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Prefix
// ============================================================================

/// Fields common to every order variant.
///
/// Times are UNIX milliseconds, UTC. A server time of zero means the order
/// is unstamped.
#[derive(Debug, Clone, Default)]
pub struct Prefix {
    /// Submitting account
    pub account_id: AccountId,

    /// Base asset code
    pub base_asset: u32,

    /// Quote asset code
    pub quote_asset: u32,

    /// Type tag
    pub order_type: OrderType,

    /// Client-supplied time (ms)
    pub client_time: u64,

    /// Preimage commitment, zero if unset
    pub commit: Commitment,

    server_time: u64,
    id: OnceLock<OrderId>,
}

impl Prefix {
    /// Create an unstamped prefix.
    pub fn new(
        account_id: AccountId,
        base_asset: u32,
        quote_asset: u32,
        order_type: OrderType,
        client_time: u64,
        commit: Commitment,
    ) -> Self {
        Self {
            account_id,
            base_asset,
            quote_asset,
            order_type,
            client_time,
            commit,
            server_time: 0,
            id: OnceLock::new(),
        }
    }

    /// Server time in milliseconds, zero if unstamped
    pub fn time(&self) -> u64 {
        self.server_time
    }

    /// True once the server time is set
    pub fn is_stamped(&self) -> bool {
        self.server_time != 0
    }

    /// Set the server time, dropping any cached order ID.
    pub fn set_time(&mut self, millis: u64) {
        self.server_time = millis;
        self.clear_id();
    }

    /// Stamp with a wall-clock time, truncated to milliseconds.
    pub fn stamp(&mut self, t: SystemTime) {
        self.set_time(unix_millis(t));
    }

    /// Submitting account
    pub fn user(&self) -> AccountId {
        self.account_id
    }

    fn clear_id(&mut self) {
        self.id = OnceLock::new();
    }

    #[cfg(test)]
    pub(crate) fn is_id_cached(&self) -> bool {
        self.id.get().is_some()
    }

    // Cache lookup or compute. `serialize` only runs on a miss.
    fn derive_id(&self, serialize: impl FnOnce() -> Vec<u8>) -> Result<OrderId, OrderError> {
        if let Some(id) = self.id.get() {
            return Ok(*id);
        }
        if !self.is_stamped() {
            return Err(OrderError::Unstamped);
        }
        let id = self.id.get_or_init(|| {
            let id = OrderId(hash256(&serialize()));
            trace!(order_id = %id, server_time = self.server_time, "computed order ID");
            id
        });
        Ok(*id)
    }
}

/// Equality ignores the ID cache.
impl PartialEq for Prefix {
    fn eq(&self, other: &Self) -> bool {
        self.account_id == other.account_id
            && self.base_asset == other.base_asset
            && self.quote_asset == other.quote_asset
            && self.order_type == other.order_type
            && self.client_time == other.client_time
            && self.server_time == other.server_time
            && self.commit == other.commit
    }
}

impl Eq for Prefix {}

fn expect_stamped(id: Result<OrderId, OrderError>) -> OrderId {
    match id {
        Ok(id) => id,
        Err(e) => panic!("order ID requested before stamping: {e}"),
    }
}

// ============================================================================
// InstantOrder
// ============================================================================

/// Order resolved immediately against the book rather than resting on it.
///
/// Fields are reached through accessors. Every mutable accessor drops the
/// cached ID so the next [`id`](Self::id) hashes the edited fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantOrder {
    prefix: Prefix,
    trade: Trade,
}

impl InstantOrder {
    /// Combine a prefix and a trade.
    pub fn new(mut prefix: Prefix, trade: Trade) -> Self {
        prefix.clear_id();
        Self { prefix, trade }
    }

    /// Common fields
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Mutable common fields. Drops the cached ID.
    pub fn prefix_mut(&mut self) -> &mut Prefix {
        self.prefix.clear_id();
        &mut self.prefix
    }

    /// Trade details
    pub fn trade(&self) -> &Trade {
        &self.trade
    }

    /// Mutable trade details. Drops the cached ID.
    pub fn trade_mut(&mut self) -> &mut Trade {
        self.prefix.clear_id();
        &mut self.trade
    }

    /// Order ID, or [`OrderError::Unstamped`].
    pub fn try_id(&self) -> Result<OrderId, OrderError> {
        self.prefix.derive_id(|| self.serialize())
    }

    /// Order ID.
    ///
    /// # Panics
    ///
    /// If the order has not been stamped.
    pub fn id(&self) -> OrderId {
        expect_stamped(self.try_id())
    }
}

// ============================================================================
// CancelOrder
// ============================================================================

/// Request to cancel a prior order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrder {
    prefix: Prefix,
    target_order_id: OrderId,
}

impl CancelOrder {
    /// Combine a prefix and a target.
    pub fn new(mut prefix: Prefix, target_order_id: OrderId) -> Self {
        prefix.clear_id();
        Self {
            prefix,
            target_order_id,
        }
    }

    /// Common fields
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Mutable common fields. Drops the cached ID.
    pub fn prefix_mut(&mut self) -> &mut Prefix {
        self.prefix.clear_id();
        &mut self.prefix
    }

    /// Order being canceled
    pub fn target_order_id(&self) -> OrderId {
        self.target_order_id
    }

    /// Retarget the cancel. Drops the cached ID.
    pub fn set_target_order_id(&mut self, target: OrderId) {
        self.prefix.clear_id();
        self.target_order_id = target;
    }

    /// Order ID, or [`OrderError::Unstamped`].
    pub fn try_id(&self) -> Result<OrderId, OrderError> {
        self.prefix.derive_id(|| self.serialize())
    }

    /// Order ID.
    ///
    /// # Panics
    ///
    /// If the order has not been stamped.
    pub fn id(&self) -> OrderId {
        expect_stamped(self.try_id())
    }
}

// ============================================================================
// Order
// ============================================================================

/// Any order accepted by the venue.
///
/// ## Example
///
/// ```
/// use dex_orders::types::{
///     AccountId, CoinId, Commitment, InstantOrder, Order, OrderType, Prefix, Side, Trade,
/// };
///
/// let prefix = Prefix::new(AccountId([1; 32]), 42, 0, OrderType::Instant, 1_700_000_000_000, Commitment([9; 32]));
/// let trade = Trade::new(vec![CoinId(vec![2; 36])], Side::Sell, 1_000, "DsAddr").unwrap();
/// let mut order = Order::from(InstantOrder::new(prefix, trade));
///
/// assert!(order.try_id().is_err());
/// order.set_time(1_700_000_000_123);
/// assert_eq!(order.id(), order.id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    /// Instant order
    Instant(InstantOrder),
    /// Cancel order
    Cancel(CancelOrder),
}

impl Order {
    /// Common fields
    pub fn prefix(&self) -> &Prefix {
        match self {
            Order::Instant(o) => &o.prefix,
            Order::Cancel(o) => &o.prefix,
        }
    }

    /// Mutable common fields. Drops the cached ID.
    pub fn prefix_mut(&mut self) -> &mut Prefix {
        match self {
            Order::Instant(o) => o.prefix_mut(),
            Order::Cancel(o) => o.prefix_mut(),
        }
    }

    /// Trade details, `None` for a cancel order
    pub fn trade(&self) -> Option<&Trade> {
        match self {
            Order::Instant(o) => Some(o.trade()),
            Order::Cancel(_) => None,
        }
    }

    /// Mutable trade details, `None` for a cancel order. Drops the cached ID.
    pub fn trade_mut(&mut self) -> Option<&mut Trade> {
        match self {
            Order::Instant(o) => Some(o.trade_mut()),
            Order::Cancel(_) => None,
        }
    }

    /// Order ID, or [`OrderError::Unstamped`].
    pub fn try_id(&self) -> Result<OrderId, OrderError> {
        match self {
            Order::Instant(o) => o.try_id(),
            Order::Cancel(o) => o.try_id(),
        }
    }

    /// Order ID.
    ///
    /// # Panics
    ///
    /// If the order has not been stamped.
    pub fn id(&self) -> OrderId {
        expect_stamped(self.try_id())
    }

    /// Hex string of the order ID.
    ///
    /// # Panics
    ///
    /// If the order has not been stamped.
    pub fn uid(&self) -> String {
        self.id().to_string()
    }

    /// Submitting account
    pub fn user(&self) -> AccountId {
        self.prefix().account_id
    }

    /// Type tag stored in the prefix
    pub fn order_type(&self) -> OrderType {
        self.prefix().order_type
    }

    /// Base asset code
    pub fn base(&self) -> u32 {
        self.prefix().base_asset
    }

    /// Quote asset code
    pub fn quote(&self) -> u32 {
        self.prefix().quote_asset
    }

    /// Client time (ms)
    pub fn client_time(&self) -> u64 {
        self.prefix().client_time
    }

    /// Server time (ms), zero if unstamped
    pub fn time(&self) -> u64 {
        self.prefix().time()
    }

    /// Set the server time, dropping any cached ID.
    pub fn set_time(&mut self, millis: u64) {
        self.prefix_mut().set_time(millis);
    }

    /// Stamp with a wall-clock time.
    pub fn stamp(&mut self, t: SystemTime) {
        self.prefix_mut().stamp(t);
    }

    /// Preimage commitment
    pub fn commitment(&self) -> Commitment {
        self.prefix().commit
    }
}

impl From<InstantOrder> for Order {
    fn from(o: InstantOrder) -> Self {
        Order::Instant(o)
    }
}

impl From<CancelOrder> for Order {
    fn from(o: CancelOrder) -> Self {
        Order::Cancel(o)
    }
}

/// The order ID in hex, or `unstamped`.
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_id() {
            Ok(id) => write!(f, "{}", id),
            Err(_) => f.write_str("unstamped"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
