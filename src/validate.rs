//! Order status and type-specific validation.
//!
//! Status is tracked by the matching engine, not by the order. The
//! validator cross-checks an order against the status it is about to be
//! recorded with and the market's lot size.
//!
//! ## Rules, in order
//!
//! 1. Base and quote asset must differ.
//! 2. Instant and cancel orders may only be epoch, executed or revoked.
//!    Neither ever rests on the book.
//! 3. The prefix type tag must match the variant.
//! 4. Instant sell orders must have quantity and remaining amount in whole
//!    lots. Buy orders are sized in the quote asset and are checked by the
//!    order router instead.

use std::fmt;

use tracing::debug;

use crate::error::ValidationError;
use crate::types::{Order, OrderType, Side};

/// Lifecycle status of an order, as tracked by the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Not known
    #[default]
    Unknown,
    /// Received and waiting for its epoch to close
    Epoch,
    /// Resting on the book
    Booked,
    /// Matched or processed
    Executed,
    /// Canceled by its owner
    Canceled,
    /// Revoked by the venue
    Revoked,
}

impl OrderStatus {
    /// Integer code for storage
    pub fn to_u8(self) -> u8 {
        match self {
            OrderStatus::Unknown => 0,
            OrderStatus::Epoch => 1,
            OrderStatus::Booked => 2,
            OrderStatus::Executed => 3,
            OrderStatus::Canceled => 4,
            OrderStatus::Revoked => 5,
        }
    }

    /// Parse a storage code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderStatus::Unknown),
            1 => Some(OrderStatus::Epoch),
            2 => Some(OrderStatus::Booked),
            3 => Some(OrderStatus::Executed),
            4 => Some(OrderStatus::Canceled),
            5 => Some(OrderStatus::Revoked),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Unknown => "unknown",
            OrderStatus::Epoch => "epoch",
            OrderStatus::Booked => "booked",
            OrderStatus::Executed => "executed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Revoked => "revoked",
        }
    }

    /// True if no further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Executed | OrderStatus::Canceled | OrderStatus::Revoked
        )
    }

    // Statuses allowed for orders that never rest on the book.
    fn is_unbooked(self) -> bool {
        matches!(
            self,
            OrderStatus::Epoch | OrderStatus::Executed | OrderStatus::Revoked
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `order` is sensible with the given status on a market with
/// the given lot size. Returns the first violated rule.
///
/// The order need not be stamped and is never modified.
///
/// ## Example
///
/// ```
/// use dex_orders::error::ValidationError;
/// use dex_orders::types::{AccountId, CoinId, Commitment, InstantOrder, Order, OrderType, Prefix, Side, Trade};
/// use dex_orders::validate::{validate_order, OrderStatus};
///
/// let prefix = Prefix::new(AccountId([1; 32]), 42, 0, OrderType::Instant, 0, Commitment([9; 32]));
/// let trade = Trade::new(vec![CoinId(vec![2; 36])], Side::Sell, 1_500, "DsAddr").unwrap();
/// let order = Order::from(InstantOrder::new(prefix, trade));
///
/// assert!(matches!(
///     validate_order(&order, OrderStatus::Epoch, 1_000),
///     Err(ValidationError::LotSizeViolation { .. })
/// ));
/// ```
pub fn validate_order(
    order: &Order,
    status: OrderStatus,
    lot_size: u64,
) -> Result<(), ValidationError> {
    let result = check(order, status, lot_size);
    if let Err(ref e) = result {
        debug!(
            base = order.base(),
            quote = order.quote(),
            order_type = %order.order_type(),
            %status,
            lot_size,
            error = %e,
            "order failed validation"
        );
    }
    result
}

fn check(order: &Order, status: OrderStatus, lot_size: u64) -> Result<(), ValidationError> {
    if order.base() == order.quote() {
        return Err(ValidationError::SameAsset {
            asset: order.base(),
        });
    }

    match order {
        Order::Instant(o) => {
            check_status_and_tag(OrderType::Instant, o.prefix().order_type, status)?;

            let trade = o.trade();
            if trade.side == Side::Sell {
                if lot_size == 0 {
                    return Err(ValidationError::ZeroLotSize);
                }
                let remaining = trade.remaining();
                if trade.quantity % lot_size != 0 || remaining % lot_size != 0 {
                    return Err(ValidationError::LotSizeViolation {
                        quantity: trade.quantity,
                        remaining,
                        lot_size,
                    });
                }
            }
        }
        Order::Cancel(o) => {
            check_status_and_tag(OrderType::Cancel, o.prefix().order_type, status)?;
        }
    }

    Ok(())
}

fn check_status_and_tag(
    kind: OrderType,
    tag: OrderType,
    status: OrderStatus,
) -> Result<(), ValidationError> {
    if !status.is_unbooked() {
        return Err(ValidationError::BadStatusForType { kind, status });
    }
    if tag != kind {
        return Err(ValidationError::WrongTypeTag {
            expected: kind,
            found: tag,
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
