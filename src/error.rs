//! Error types for the order model.
//!
//! Two enums cover every returned failure:
//!
//! - [`OrderError`]: malformed input, representation mismatches, decode
//!   failures, oversized trades, unknown assets and the unstamped-order
//!   precondition
//! - [`ValidationError`]: the classified rules checked by
//!   [`validate_order`](crate::validate::validate_order)
//!
//! None of these errors leave an order partially mutated.

use thiserror::Error;

use crate::types::OrderType;
use crate::validate::OrderStatus;

/// Errors produced by identifier parsing, column mapping, decoding and
/// market lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderError {
    /// An order ID was requested before the server stamped the order.
    ///
    /// This is a caller bug. [`Order::id`](crate::types::Order::id) panics
    /// on it; [`Order::try_id`](crate::types::Order::try_id) returns it.
    #[error("order server time is unset, ID is undefined")]
    Unstamped,

    /// Hex identifier longer than the identifier itself.
    #[error("invalid order ID: too long {len} > {max}")]
    IdTooLong {
        /// Number of characters supplied
        len: usize,
        /// Maximum number of hex characters
        max: usize,
    },

    /// Hex identifier failed to decode.
    #[error("order ID decode error: {0}")]
    InvalidHex(String),

    /// A stored value has the wrong length for a fixed-size field.
    #[error("cannot convert {got}-byte value to {field} ({expected} bytes)")]
    RepresentationMismatch {
        /// Name of the target type
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length actually supplied
        got: usize,
    },

    /// A required column was NULL.
    #[error("{field} column must not be absent")]
    MissingColumn {
        /// Name of the target type
        field: &'static str,
    },

    /// Buffer ended before the encoding was complete.
    #[error("truncated encoding: need {need} bytes, got {got}")]
    Truncated {
        /// Bytes required
        need: usize,
        /// Bytes available
        got: usize,
    },

    /// Order-type tag is not instant or cancel.
    #[error("unknown order type {0}")]
    UnknownType(u8),

    /// Side byte other than 0 (buy) or 1 (sell).
    #[error("invalid side byte {0}")]
    InvalidSide(u8),

    /// Payment address is not valid UTF-8.
    #[error("swap address is not valid UTF-8")]
    InvalidAddress,

    /// A trade listed more coins than the one-byte count can encode.
    #[error("too many funding coins: {count} > {max}")]
    TooManyCoins {
        /// Coins supplied
        count: usize,
        /// Most coins allowed
        max: usize,
    },

    /// Bytes remained after a fixed-length encoding.
    #[error("{0} trailing bytes after encoding")]
    TrailingBytes(usize),

    /// Asset code missing from the symbol table.
    #[error("{role} asset {id} not found")]
    AssetNotFound {
        /// "base" or "quote"
        role: &'static str,
        /// Unresolved asset code
        id: u32,
    },

    /// Configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Classified validation failures. The validator returns the first rule an
/// order violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Base and quote asset are the same.
    #[error("same asset {asset} specified for base and quote")]
    SameAsset {
        /// The repeated asset code
        asset: u32,
    },

    /// Status is not allowed for this order variant.
    #[error("invalid {kind} order status {status}")]
    BadStatusForType {
        /// Variant being validated
        kind: OrderType,
        /// Rejected status
        status: OrderStatus,
    },

    /// Prefix type tag disagrees with the order variant.
    #[error("{expected} order has wrong order type {found}")]
    WrongTypeTag {
        /// Tag implied by the variant
        expected: OrderType,
        /// Tag stored in the prefix
        found: OrderType,
    },

    /// Sell quantity or remaining amount is not a lot multiple.
    #[error("sell order fails lot size requirement: quantity {quantity}, remaining {remaining}, lot size {lot_size}")]
    LotSizeViolation {
        /// Order quantity
        quantity: u64,
        /// Unfilled amount
        remaining: u64,
        /// Market lot size
        lot_size: u64,
    },

    /// Lot size of zero cannot be checked against.
    #[error("market lot size is zero")]
    ZeroLotSize,
}
