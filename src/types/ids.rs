//! Fixed-size identifiers referenced by orders.
//!
//! ## Hashing
//!
//! [`OrderId`] and [`Commitment`](super::Commitment) are both SHA-256
//! digests. [`hash256`] is the single place the digest is computed.
//!
//! SHA-256 is not Blake-256. Venues and clients that hash with Blake-256
//! derive different IDs and commitments from identical bytes; the two are
//! not wire compatible.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::OrderError;

/// Length of every 32-byte hash in the order model.
pub const HASH_SIZE: usize = 32;

/// Length in bytes of an [`OrderId`].
pub const ORDER_ID_SIZE: usize = HASH_SIZE;

/// Length in bytes of an [`AccountId`].
pub const ACCOUNT_ID_SIZE: usize = 32;

/// Compute the SHA-256 hash of the given data.
pub fn hash256(data: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&result);
    hash
}

// ============================================================================
// AccountId
// ============================================================================

/// Account identifier issued by the account subsystem. Orders only
/// reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; ACCOUNT_ID_SIZE]);

impl AccountId {
    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_SIZE] {
        &self.0
    }
}

impl From<[u8; ACCOUNT_ID_SIZE]> for AccountId {
    fn from(b: [u8; ACCOUNT_ID_SIZE]) -> Self {
        AccountId(b)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// ============================================================================
// CoinId
// ============================================================================

/// Opaque reference to a funding coin. Its length depends on the asset and
/// is implicit in the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CoinId(pub Vec<u8>);

impl CoinId {
    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length coin reference
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for CoinId {
    fn from(b: Vec<u8>) -> Self {
        CoinId(b)
    }
}

impl From<&[u8]> for CoinId {
    fn from(b: &[u8]) -> Self {
        CoinId(b.to_vec())
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

// ============================================================================
// OrderId
// ============================================================================

/// Content-addressed order identifier: the SHA-256 hash of the order's
/// canonical serialization.
///
/// ## Example
///
/// ```
/// use dex_orders::types::OrderId;
///
/// let oid = OrderId::from_hex("ff").unwrap();
/// assert_eq!(oid.as_bytes()[31], 0xff);
/// assert_eq!(oid.to_string().len(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct OrderId(pub [u8; ORDER_ID_SIZE]);

impl OrderId {
    /// Decode an order ID from a hexadecimal string.
    ///
    /// Inputs shorter than 64 characters are right-aligned, so leading zero
    /// bytes may be omitted.
    pub fn from_hex(s: &str) -> Result<Self, OrderError> {
        if s.len() > ORDER_ID_SIZE * 2 {
            return Err(OrderError::IdTooLong {
                len: s.len(),
                max: ORDER_ID_SIZE * 2,
            });
        }
        let b = hex::decode(s).map_err(|e| OrderError::InvalidHex(e.to_string()))?;
        let mut oid = [0u8; ORDER_ID_SIZE];
        oid[ORDER_ID_SIZE - b.len()..].copy_from_slice(&b);
        Ok(OrderId(oid))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; ORDER_ID_SIZE] {
        &self.0
    }

    /// True if every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ORDER_ID_SIZE]
    }
}

impl From<[u8; ORDER_ID_SIZE]> for OrderId {
    fn from(b: [u8; ORDER_ID_SIZE]) -> Self {
        OrderId(b)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderId::from_hex(s)
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        OrderId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
