//! Bit position derivation for Bloom filters
//!
//! A single SHA-256 stands in for k independent hash functions: the element is
//! followed by one index byte, and each index `0..k` yields its own digest. The
//! first 16 hex digits of the digest (64 bits) are read as an integer and
//! reduced into the bit array.
//!
//! The scheme is fixed. Filters built elsewhere with the same scheme stay
//! readable only as long as positions are derived exactly this way.

use crate::Result;
use sha2::{Digest, Sha256};

/// Hex digits of the digest that make up a position (16 digits = 64 bits).
const HEX_PREFIX_LEN: usize = 16;

/// Hash `buf` to a position in a bit array of `bit_len` bits.
///
/// `bit_len` must be non-zero.
pub fn position_hash(buf: &[u8], bit_len: u64) -> Result<u64> {
    let hexdigest = hex::encode(Sha256::digest(buf));
    let value = u64::from_str_radix(&hexdigest[..HEX_PREFIX_LEN], 16)?;
    Ok(value % bit_len)
}

/// Lazily derived bit positions of one element.
///
/// Yields exactly `hash_count` positions, each in `[0, bit_len)`. Iteration
/// stops after the first error.
#[derive(Debug, Clone)]
pub struct BitPositions {
    /// Element bytes followed by the index byte
    buf: Vec<u8>,
    hash_count: u8,
    bit_len: u64,
    next: u8,
}

impl BitPositions {
    pub fn new(element: &[u8], hash_count: u8, bit_len: u64) -> Self {
        debug_assert!(hash_count == 0 || bit_len > 0, "bit_len must be > 0");

        let mut buf = Vec::with_capacity(element.len() + 1);
        buf.extend_from_slice(element);
        buf.push(0);

        BitPositions {
            buf,
            hash_count,
            bit_len,
            next: 0,
        }
    }
}

impl Iterator for BitPositions {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.hash_count {
            return None;
        }

        let last = self.buf.len() - 1;
        self.buf[last] = self.next;

        match position_hash(&self.buf, self.bit_len) {
            Ok(pos) => {
                self.next += 1;
                Some(Ok(pos))
            }
            Err(e) => {
                self.next = self.hash_count;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.hash_count - self.next) as usize;
        (0, Some(remaining))
    }
}

/// Derive all `hash_count` bit positions of `element`.
pub fn bit_positions(element: &[u8], hash_count: u8, bit_len: u64) -> Result<Vec<u64>> {
    BitPositions::new(element, hash_count, bit_len).collect()
}
