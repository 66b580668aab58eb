//! Canonical order serialization.
//!
//! ## Layout
//!
//! Big-endian, fixed fields first, no padding:
//!
//! | Part   | Fields |
//! |--------|--------|
//! | Prefix | account (32) ‖ base (4) ‖ quote (4) ‖ type (1) ‖ client time ms (8) ‖ server time ms (8) ‖ commitment (32) |
//! | Trade  | coin count (1) ‖ coins (implicit lengths) ‖ side (1) ‖ quantity (8) ‖ address (rest, UTF-8) |
//! | Cancel | target order ID (32) |
//!
//! An instant order is Prefix ‖ Trade, a cancel order is Prefix ‖ Cancel.
//! The bytes are a pure function of the field values and feed the order ID.
//! The fill counter and the ID cache are not serialized.
//!
//! ## Decoding
//!
//! Decoding is provided for persistence. Coin lengths are not encoded, so
//! decoding a trade needs the coin ID length of the funding asset.

use std::time::{SystemTime, UNIX_EPOCH};

use super::commit::{Commitment, COMMITMENT_SIZE};
use super::ids::{AccountId, CoinId, OrderId, ACCOUNT_ID_SIZE, ORDER_ID_SIZE};
use super::order::{CancelOrder, InstantOrder, Order, OrderType, Prefix, Side};
use super::trade::Trade;
use crate::error::OrderError;

/// Length in bytes of a serialized [`Prefix`]: 89.
pub const PREFIX_LEN: usize = ACCOUNT_ID_SIZE + 4 + 4 + 1 + 8 + 8 + COMMITMENT_SIZE;

/// Milliseconds since the UNIX epoch. Times before the epoch map to zero.
pub fn unix_millis(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Serialization
// ============================================================================

impl Prefix {
    /// Serialized length, always [`PREFIX_LEN`]
    pub fn serialize_size(&self) -> usize {
        PREFIX_LEN
    }

    /// Append the serialized prefix to `b`.
    pub fn serialize_into(&self, b: &mut Vec<u8>) {
        b.extend_from_slice(self.account_id.as_bytes());
        b.extend_from_slice(&self.base_asset.to_be_bytes());
        b.extend_from_slice(&self.quote_asset.to_be_bytes());
        b.push(self.order_type.to_u8());
        b.extend_from_slice(&self.client_time.to_be_bytes());
        b.extend_from_slice(&self.time().to_be_bytes());
        b.extend_from_slice(self.commit.as_bytes());
    }

    /// Serialize the prefix.
    pub fn serialize(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(PREFIX_LEN);
        self.serialize_into(&mut b);
        b
    }
}

impl Trade {
    /// Serialized length
    pub fn serialize_size(&self) -> usize {
        let coin_sz: usize = self.coins().iter().map(CoinId::len).sum();
        1 + coin_sz + 1 + 8 + self.address.len()
    }

    /// Append the serialized trade to `b`.
    ///
    /// The coin count is a single byte. [`Trade`] caps its coin list at
    /// [`MAX_COINS`](super::trade::MAX_COINS), so the count always fits.
    pub fn serialize_into(&self, b: &mut Vec<u8>) {
        b.push(self.coins().len() as u8);
        for coin in self.coins() {
            b.extend_from_slice(coin.as_bytes());
        }
        b.push(self.side.to_u8());
        b.extend_from_slice(&self.quantity.to_be_bytes());
        b.extend_from_slice(self.address.as_bytes());
    }

    /// Serialize the trade.
    pub fn serialize(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(self.serialize_size());
        self.serialize_into(&mut b);
        b
    }
}

impl InstantOrder {
    /// Serialized length
    pub fn serialize_size(&self) -> usize {
        self.prefix().serialize_size() + self.trade().serialize_size()
    }

    /// Serialize the order: Prefix ‖ Trade.
    pub fn serialize(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(self.serialize_size());
        self.prefix().serialize_into(&mut b);
        self.trade().serialize_into(&mut b);
        b
    }
}

impl CancelOrder {
    /// Serialized length
    pub fn serialize_size(&self) -> usize {
        self.prefix().serialize_size() + ORDER_ID_SIZE
    }

    /// Serialize the order: Prefix ‖ target order ID.
    pub fn serialize(&self) -> Vec<u8> {
        let mut b = Vec::with_capacity(self.serialize_size());
        self.prefix().serialize_into(&mut b);
        b.extend_from_slice(self.target_order_id().as_bytes());
        b
    }
}

impl Order {
    /// Serialized length
    pub fn serialize_size(&self) -> usize {
        match self {
            Order::Instant(o) => o.serialize_size(),
            Order::Cancel(o) => o.serialize_size(),
        }
    }

    /// Canonical serialization of the order.
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Order::Instant(o) => o.serialize(),
            Order::Cancel(o) => o.serialize(),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], OrderError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(OrderError::Truncated {
                need: self.pos.saturating_add(n),
                got: self.buf.len(),
            })?;
        let s = &self.buf[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], OrderError> {
        let mut a = [0u8; N];
        a.copy_from_slice(self.take(N)?);
        Ok(a)
    }

    fn u8(&mut self) -> Result<u8, OrderError> {
        Ok(self.array::<1>()?[0])
    }

    fn u32(&mut self) -> Result<u32, OrderError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, OrderError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    fn rest(&mut self) -> &'a [u8] {
        let s = &self.buf[self.pos..];
        self.pos = self.buf.len();
        s
    }

    fn finish(&self) -> Result<(), OrderError> {
        match self.buf.len() - self.pos {
            0 => Ok(()),
            n => Err(OrderError::TrailingBytes(n)),
        }
    }
}

fn read_prefix(r: &mut Reader<'_>) -> Result<Prefix, OrderError> {
    let account_id = AccountId(r.array()?);
    let base_asset = r.u32()?;
    let quote_asset = r.u32()?;
    let tag = r.u8()?;
    let order_type = OrderType::from_u8(tag).ok_or(OrderError::UnknownType(tag))?;
    let client_time = r.u64()?;
    let server_time = r.u64()?;
    let commit = Commitment(r.array()?);

    let mut prefix = Prefix::new(
        account_id,
        base_asset,
        quote_asset,
        order_type,
        client_time,
        commit,
    );
    prefix.set_time(server_time);
    Ok(prefix)
}

impl Prefix {
    /// Decode exactly one serialized prefix.
    pub fn decode(b: &[u8]) -> Result<Self, OrderError> {
        let mut r = Reader::new(b);
        let prefix = read_prefix(&mut r)?;
        r.finish()?;
        Ok(prefix)
    }
}

impl CancelOrder {
    /// Decode a serialized cancel order.
    pub fn decode(b: &[u8]) -> Result<Self, OrderError> {
        let mut r = Reader::new(b);
        let prefix = read_prefix(&mut r)?;
        let target = OrderId(r.array()?);
        r.finish()?;
        Ok(CancelOrder::new(prefix, target))
    }
}

impl InstantOrder {
    /// Decode a serialized instant order whose coins are each
    /// `coin_id_len` bytes. The filled amount starts at zero.
    pub fn decode(b: &[u8], coin_id_len: usize) -> Result<Self, OrderError> {
        let mut r = Reader::new(b);
        let prefix = read_prefix(&mut r)?;

        let count = r.u8()? as usize;
        let coins = (0..count)
            .map(|_| r.take(coin_id_len).map(CoinId::from))
            .collect::<Result<Vec<_>, _>>()?;
        let side_byte = r.u8()?;
        let side = Side::from_u8(side_byte).ok_or(OrderError::InvalidSide(side_byte))?;
        let quantity = r.u64()?;
        let address = std::str::from_utf8(r.rest()).map_err(|_| OrderError::InvalidAddress)?;

        Ok(InstantOrder::new(
            prefix,
            Trade::new(coins, side, quantity, address)?,
        ))
    }
}

impl Order {
    /// Decode a serialized order, dispatching on the prefix type tag.
    ///
    /// `coin_id_len` is only used for instant orders. A prefix tagged
    /// [`OrderType::Unknown`] is rejected as [`OrderError::UnknownType`].
    pub fn decode(b: &[u8], coin_id_len: usize) -> Result<Self, OrderError> {
        let tag_offset = ACCOUNT_ID_SIZE + 8;
        let tag = *b.get(tag_offset).ok_or(OrderError::Truncated {
            need: PREFIX_LEN,
            got: b.len(),
        })?;
        match OrderType::from_u8(tag) {
            Some(OrderType::Instant) => Ok(InstantOrder::decode(b, coin_id_len)?.into()),
            Some(OrderType::Cancel) => Ok(CancelOrder::decode(b)?.into()),
            Some(OrderType::Unknown) | None => Err(OrderError::UnknownType(tag)),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
