//! Mapping of fixed-size fields to storage columns.
//!
//! Every field maps to one fixed-length binary column. A zero
//! [`Commitment`] or [`Preimage`] is stored as `None` (NULL) so "unset" is
//! never confused with a genuine hash. Loading checks the length before
//! building a value, so a mismatch leaves nothing half-written.

use super::commit::{Commitment, Preimage, COMMITMENT_SIZE, PREIMAGE_SIZE};
use super::ids::{AccountId, OrderId, ACCOUNT_ID_SIZE, ORDER_ID_SIZE};
use crate::error::OrderError;

/// A value stored in a single fixed-length binary column.
pub trait FixedColumn: Sized {
    /// Column value, `None` for an absent marker.
    fn to_column(&self) -> Option<Vec<u8>>;

    /// Rebuild from a column value.
    fn from_column(src: Option<&[u8]>) -> Result<Self, OrderError>;
}

fn fixed<const N: usize>(field: &'static str, src: &[u8]) -> Result<[u8; N], OrderError> {
    <[u8; N]>::try_from(src).map_err(|_| OrderError::RepresentationMismatch {
        field,
        expected: N,
        got: src.len(),
    })
}

impl FixedColumn for Commitment {
    fn to_column(&self) -> Option<Vec<u8>> {
        if self.is_zero() {
            None
        } else {
            Some(self.0.to_vec())
        }
    }

    fn from_column(src: Option<&[u8]>) -> Result<Self, OrderError> {
        match src {
            None => Ok(Commitment::default()),
            Some(b) => fixed::<COMMITMENT_SIZE>("Commitment", b).map(Commitment),
        }
    }
}

impl FixedColumn for Preimage {
    fn to_column(&self) -> Option<Vec<u8>> {
        if self.is_zero() {
            None
        } else {
            Some(self.0.to_vec())
        }
    }

    fn from_column(src: Option<&[u8]>) -> Result<Self, OrderError> {
        match src {
            None => Ok(Preimage::default()),
            Some(b) => fixed::<PREIMAGE_SIZE>("Preimage", b).map(Preimage),
        }
    }
}

impl FixedColumn for OrderId {
    fn to_column(&self) -> Option<Vec<u8>> {
        Some(self.0.to_vec())
    }

    fn from_column(src: Option<&[u8]>) -> Result<Self, OrderError> {
        let b = src.ok_or(OrderError::MissingColumn { field: "OrderId" })?;
        fixed::<ORDER_ID_SIZE>("OrderId", b).map(OrderId)
    }
}

impl FixedColumn for AccountId {
    fn to_column(&self) -> Option<Vec<u8>> {
        Some(self.0.to_vec())
    }

    fn from_column(src: Option<&[u8]>) -> Result<Self, OrderError> {
        let b = src.ok_or(OrderError::MissingColumn { field: "AccountId" })?;
        fixed::<ACCOUNT_ID_SIZE>("AccountId", b).map(AccountId)
    }
}
