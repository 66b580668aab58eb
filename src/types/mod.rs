//! Core data types of the order model
//!
//! ## Types
//!
//! - [`Order`]: Instant or cancel order
//! - [`Prefix`]: Fields shared by every order
//! - [`Trade`]: Fund-moving payload with a thread-safe fill counter
//! - [`OrderId`], [`AccountId`], [`CoinId`]: identifiers
//! - [`Commitment`], [`Preimage`]: commit-reveal pair
//!
//! ## Encoding
//!
//! All multi-byte integers are big-endian. See [`encode`] for the layout.

mod commit;
mod ids;
mod order;
mod trade;
pub mod column;
pub mod encode;

pub use column::FixedColumn;
pub use commit::{Commitment, Preimage, COMMITMENT_SIZE, PREIMAGE_SIZE};
pub use encode::{unix_millis, PREFIX_LEN};
pub use ids::{hash256, AccountId, CoinId, OrderId, ACCOUNT_ID_SIZE, HASH_SIZE, ORDER_ID_SIZE};
pub use order::{CancelOrder, InstantOrder, Order, OrderType, Prefix, Side};
pub use trade::{Trade, MAX_COINS};
