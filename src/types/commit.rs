//! Commit-reveal primitives.
//!
//! A client generates a random [`Preimage`], places only its [`Commitment`]
//! in the order prefix, and reveals the preimage once the epoch's processing
//! is finalized. Nobody, the venue included, learns the preimage early.
//!
//! ## Example
//!
//! ```
//! use dex_orders::types::Preimage;
//!
//! let pi = Preimage::random();
//! let commit = pi.commit();
//! assert!(!commit.is_zero());
//! assert_eq!(commit, pi.commit());
//! ```

use std::fmt;

use rand::RngCore;

use super::ids::{hash256, HASH_SIZE};

/// Length of a [`Commitment`] in bytes.
pub const COMMITMENT_SIZE: usize = HASH_SIZE;

/// Length of a [`Preimage`] in bytes.
pub const PREIMAGE_SIZE: usize = 32;

// ============================================================================
// Commitment
// ============================================================================

/// SHA-256 hash of a [`Preimage`]. The all-zero value means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Commitment(pub [u8; COMMITMENT_SIZE]);

impl Commitment {
    /// True for the reserved unset value
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; COMMITMENT_SIZE]
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_SIZE] {
        &self.0
    }
}

impl From<[u8; COMMITMENT_SIZE]> for Commitment {
    fn from(b: [u8; COMMITMENT_SIZE]) -> Self {
        Commitment(b)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// ============================================================================
// Preimage
// ============================================================================

/// 32-byte secret whose hash is the order's [`Commitment`].
///
/// `Debug` is redacted; the bytes are only reachable through
/// [`Preimage::as_bytes`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Preimage(pub [u8; PREIMAGE_SIZE]);

impl Preimage {
    /// Generate a fresh preimage from the thread-local CSPRNG.
    pub fn random() -> Self {
        let mut b = [0u8; PREIMAGE_SIZE];
        rand::thread_rng().fill_bytes(&mut b);
        Preimage(b)
    }

    /// Compute the commitment. Depends on the preimage bytes only.
    pub fn commit(&self) -> Commitment {
        Commitment(hash256(&self.0))
    }

    /// True for the reserved unset value
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PREIMAGE_SIZE]
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; PREIMAGE_SIZE] {
        &self.0
    }
}

impl From<[u8; PREIMAGE_SIZE]> for Preimage {
    fn from(b: [u8; PREIMAGE_SIZE]) -> Self {
        Preimage(b)
    }
}

impl fmt::Debug for Preimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("Preimage(unset)")
        } else {
            f.write_str("Preimage(..)")
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
