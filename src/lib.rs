//! # DEX Orders
//!
//! Canonical, content-addressed order model for an epoch-based swap venue.
//!
//! ## Architecture
//!
//! - **Types**: Order variants, identifiers, commit-reveal pair, fill tracker
//! - **Encoding**: Deterministic big-endian serialization feeding the order ID
//! - **Validate**: Status, type-tag and lot-size rules
//! - **Market**: Asset symbol table and market parameters
//! - **Config**: Static asset and market configuration
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical field values always serialize to identical bytes
//! 2. **Content Addressing**: An order's ID is the SHA-256 of its serialization
//! 3. **No I/O**: Pure data-model operations, no network or wallet access
//! 4. **Short Locks**: Only the fill counter is shared mutable state
//!
//! ## Compatibility
//!
//! Order IDs and commitments are SHA-256 digests. Deployments that derive
//! them with Blake-256 produce different values for the same order, so IDs
//! and commitments from this crate are not interchangeable with theirs.
//! Clients must hash with SHA-256, and stored IDs from such a system must
//! not be looked up by IDs computed here.
//!
//! ## Example
//!
//! ```
//! use dex_orders::{validate_order, AccountId, CoinId, InstantOrder, Order, OrderStatus, OrderType, Prefix, Preimage, Side, Trade};
//!
//! let preimage = Preimage::random();
//! let prefix = Prefix::new(AccountId([1; 32]), 42, 0, OrderType::Instant, 1_700_000_000_000, preimage.commit());
//! let trade = Trade::new(vec![CoinId(vec![2; 36])], Side::Sell, 2_000, "DsAddr").unwrap();
//! let mut order = Order::from(InstantOrder::new(prefix, trade));
//!
//! validate_order(&order, OrderStatus::Epoch, 1_000).unwrap();
//! order.set_time(1_700_000_000_250);
//! println!("order {}", order.id());
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy
pub mod error;

/// Core data types and their encoding
pub mod types;

/// Order status and validation rules
pub mod validate;

/// Asset symbols and market parameters
pub mod market;

/// Static configuration
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{DexConfig, Markets};
pub use error::{OrderError, ValidationError};
pub use market::{AssetRegistry, MarketInfo};
pub use types::{
    AccountId, CancelOrder, CoinId, Commitment, FixedColumn, InstantOrder, Order, OrderId,
    OrderType, Prefix, Preimage, Side, Trade,
};
pub use validate::{validate_order, OrderStatus};
