//! Standard Bloom filter over byte strings
//!
//! A space-efficient probabilistic data structure for membership testing.
//! Queries answer "possibly in the set" or "definitely not in the set".
//! Elements can be added but never removed. Adding never fails due to the
//! filter filling up: the capacity only sizes the bit array.

use crate::hash::BitPositions;
use crate::utils::{self, MAX_HASH_COUNT};
use crate::{BloomError, Result};
use tracing::{debug, warn};

/// Width in bits of one word of the bit store.
const WORD_BITS: u8 = 64;

/// A standard Bloom filter.
///
/// `add` needs `&mut self` and `has` needs `&self`, so a filter shared between
/// threads has to sit behind a lock (e.g. `RwLock<Filter>`).
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Desired probability of false positives
    prob: f64,
    /// How many bits are needed to store `capacity` elements
    bit_len: u64,
    /// Number of hash functions
    hash_count: u8,
    /// Number of elements the caller intends to store
    capacity: u32,
    /// Bit array packed into 64-bit words
    bitstore: Vec<u64>,
}

/// Word index in the bit store and bit offset inside that word for `position`.
///
/// A `word_bits` of zero means 8-bit words.
pub fn bit_location(position: u64, word_bits: u8) -> (usize, u8) {
    let word_bits = if word_bits == 0 { 8 } else { word_bits as u64 };
    let index = position / word_bits;
    let offset = position - index * word_bits;
    (index as usize, offset as u8)
}

impl Filter {
    /// Create a new Bloom filter
    ///
    /// # Arguments
    /// * `capacity` - Expected number of elements to insert
    /// * `prob` - Tolerated rate of false positives
    ///
    /// The bit array length and the number of hash functions are derived
    /// from these two values and never change afterwards.
    pub fn new(capacity: u32, prob: f64) -> Result<Self> {
        let (bit_len, hash_count, words) = Self::layout(capacity, prob)?;

        debug!(
            capacity = capacity,
            prob = prob,
            bit_len = bit_len,
            hash_count = hash_count,
            words = words,
            "Created Bloom filter"
        );

        Ok(Filter {
            prob,
            bit_len,
            hash_count,
            capacity,
            bitstore: vec![0; words],
        })
    }

    /// Rebuild a filter from a previously exported bit store.
    ///
    /// `capacity` and `prob` must be the values the filter was created with;
    /// the derived parameters are recomputed from them and `bitstore` must
    /// have exactly the matching number of words.
    pub fn from_parts(capacity: u32, prob: f64, bitstore: Vec<u64>) -> Result<Self> {
        let (bit_len, hash_count, words) = Self::layout(capacity, prob)?;
        if bitstore.len() != words {
            return Err(BloomError::BitStoreLength {
                expected: words,
                actual: bitstore.len(),
            });
        }

        debug!(
            capacity = capacity,
            prob = prob,
            bit_len = bit_len,
            hash_count = hash_count,
            "Restored Bloom filter"
        );

        Ok(Filter {
            prob,
            bit_len,
            hash_count,
            capacity,
            bitstore,
        })
    }

    /// Validate the inputs and derive (bit_len, hash_count, word count).
    pub(crate) fn layout(capacity: u32, prob: f64) -> Result<(u64, u8, usize)> {
        if capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        // NaN fails this comparison as well
        if !(prob > 0.0) {
            return Err(BloomError::InvalidProbability { prob });
        }
        // Each hash index travels as one byte
        if utils::raw_hash_count(prob) > MAX_HASH_COUNT as f64 {
            return Err(BloomError::InvalidProbability { prob });
        }
        if prob >= 1.0 {
            warn!(prob = prob, "False positive probability >= 1, filter answers nothing useful");
        }

        let hash_count = utils::optimal_hash_count(prob);
        let bit_len = utils::optimal_bit_len(capacity, prob);
        let words = usize::try_from(bit_len.div_ceil(WORD_BITS as u64))
            .map_err(|_| BloomError::BitLengthOverflow { bit_len })?;

        Ok((bit_len, hash_count, words))
    }

    /// Add an element to the set.
    ///
    /// Only fails if the underlying hash function does.
    pub fn add(&mut self, element: &[u8]) -> Result<()> {
        for pos in BitPositions::new(element, self.hash_count, self.bit_len) {
            let (index, offset) = bit_location(pos?, WORD_BITS);
            self.bitstore[index] |= 1u64 << offset;
        }
        Ok(())
    }

    /// Test whether the element might be in the set.
    ///
    /// Returns `Ok(false)` if the element is definitely absent and `Ok(true)`
    /// if it is possibly present. Only fails if the underlying hash function
    /// does.
    pub fn has(&self, element: &[u8]) -> Result<bool> {
        for pos in BitPositions::new(element, self.hash_count, self.bit_len) {
            let (index, offset) = bit_location(pos?, WORD_BITS);
            if self.bitstore[index] & (1u64 << offset) == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Like [`Filter::add`], but panics if hashing fails.
    pub fn must_add(&mut self, element: &[u8]) {
        if let Err(e) = self.add(element) {
            panic!("bloom filter add failed: {}", e);
        }
    }

    /// Like [`Filter::has`], but panics if hashing fails.
    pub fn must_have(&self, element: &[u8]) -> bool {
        self.has(element)
            .unwrap_or_else(|e| panic!("bloom filter lookup failed: {}", e))
    }

    /// Get the number of elements the filter was sized for
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Get the target false positive probability
    pub fn false_positive_probability(&self) -> f64 {
        self.prob
    }

    /// Get the length of the bit array in bits
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> u8 {
        self.hash_count
    }

    /// Raw words of the bit array, bit `p` lives in word `p / 64` at offset `p % 64`.
    pub fn bitstore(&self) -> &[u64] {
        &self.bitstore
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        if self.bit_len == 0 {
            return 0.0;
        }
        let set_bits: u64 = self.bitstore.iter().map(|w| w.count_ones() as u64).sum();
        set_bits as f64 / self.bit_len as f64
    }

    /// Get the estimated false positive rate for the current fill
    pub fn estimated_fpr(&self) -> f64 {
        self.load_factor().powi(self.hash_count as i32)
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            capacity: self.capacity,
            bit_len: self.bit_len,
            num_hash_functions: self.hash_count,
            target_fpr: self.prob,
            design_fpr: utils::expected_fpr(self.bit_len, self.capacity as u64, self.hash_count),
            load_factor: self.load_factor(),
            estimated_fpr: self.estimated_fpr(),
        }
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone)]
pub struct FilterStats {
    pub capacity: u32,
    pub bit_len: u64,
    pub num_hash_functions: u8,
    pub target_fpr: f64,
    /// FPR once `capacity` elements are stored
    pub design_fpr: f64,
    pub load_factor: f64,
    pub estimated_fpr: f64,
}

impl std::fmt::Display for FilterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Filter Stats:\n\
             - Capacity: {} elements\n\
             - Bit length: {} bits\n\
             - Hash functions: {}\n\
             - Target FPR: {:.6}\n\
             - Design FPR: {:.6}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.capacity,
            self.bit_len,
            self.num_hash_functions,
            self.target_fpr,
            self.design_fpr,
            self.load_factor,
            self.estimated_fpr
        )
    }
}
