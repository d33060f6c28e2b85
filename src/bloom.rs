//! Standard Bloom filter implementation
//!
//! A space-efficient probabilistic data structure for membership testing.
//! Keys are hashed into four seeded FNV-1a values and expanded into `k`
//! probe locations by double hashing.

use crate::codec::{self, FilterJson};
use crate::hash::{self, BaseHashes};
use crate::utils::{check_parameters, estimate_parameters, BloomParameters};
use crate::Result;
use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

/// A key accepted by [`BloomFilter::add`] and [`BloomFilter::test`]
///
/// Every variant normalizes to a sequence of 64-bit tokens that is fed to
/// the hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// A single integer, hashed as a one-token sequence
    Integer(u64),
    /// Text, hashed one token per character code
    Text(&'a str),
    /// Raw bytes, one token per byte
    Bytes(&'a [u8]),
    /// Arbitrary 64-bit tokens
    Words(&'a [u64]),
    /// Tokens that may be absent; `None` entries are skipped
    Tokens(&'a [Option<u64>]),
}

impl Input<'_> {
    /// Normalize into the canonical token sequence
    pub fn tokens(&self) -> Vec<u64> {
        match *self {
            Input::Integer(value) => vec![value],
            Input::Text(text) => text.chars().map(|c| c as u64).collect(),
            Input::Bytes(bytes) => bytes.iter().map(|&b| b as u64).collect(),
            Input::Words(words) => words.to_vec(),
            Input::Tokens(tokens) => tokens.iter().flatten().copied().collect(),
        }
    }
}

impl From<u64> for Input<'_> {
    fn from(value: u64) -> Self {
        Input::Integer(value)
    }
}

impl From<i64> for Input<'_> {
    /// Negative values are taken modulo 2^64
    fn from(value: i64) -> Self {
        Input::Integer(value as u64)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a [u64]> for Input<'a> {
    fn from(words: &'a [u64]) -> Self {
        Input::Words(words)
    }
}

impl<'a, const N: usize> From<&'a [u64; N]> for Input<'a> {
    fn from(words: &'a [u64; N]) -> Self {
        Input::Words(words)
    }
}

impl<'a> From<&'a [Option<u64>]> for Input<'a> {
    fn from(tokens: &'a [Option<u64>]) -> Self {
        Input::Tokens(tokens)
    }
}

/// Sizing configuration for a [`BloomFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Expected number of elements (n)
    pub expected_items: f64,
    /// Target false positive probability (p)
    pub false_positive_rate: f64,
}

/// A standard Bloom filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Bit array storing the filter data; its length is m
    bits: BitVec,
    /// Number of probe locations per key (k)
    num_hashes: usize,
}

impl BloomFilter {
    /// Create a new Bloom filter
    ///
    /// # Arguments
    /// * `expected_elements` - Expected number of elements to insert
    /// * `desired_fpr` - Target false positive probability, in (0, 1)
    pub fn new(expected_elements: f64, desired_fpr: f64) -> Result<Self> {
        let BloomParameters {
            num_bits,
            num_hashes,
        } = estimate_parameters(expected_elements, desired_fpr)?;

        tracing::debug!(
            expected_elements,
            desired_fpr,
            m = num_bits,
            k = num_hashes,
            "created bloom filter"
        );

        Ok(BloomFilter {
            bits: BitVec::from_elem(num_bits, false),
            num_hashes,
        })
    }

    /// Create a Bloom filter from a sizing configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::new(config.expected_items, config.false_positive_rate)
    }

    /// Create a Bloom filter with specific parameters
    pub fn with_size(bit_count: usize, num_hashes: usize) -> Result<Self> {
        check_parameters(bit_count, num_hashes)?;

        Ok(BloomFilter {
            bits: BitVec::from_elem(bit_count, false),
            num_hashes,
        })
    }

    /// The `i`-th probe location for the given base hashes
    pub fn location(&self, h: &BaseHashes, i: u64) -> usize {
        hash::location(h, i, self.bits.len() as u64) as usize
    }

    /// Insert a key into the filter. Always returns `true`.
    pub fn add<'a>(&mut self, data: impl Into<Input<'a>>) -> bool {
        let h = hash::base_hashes(&data.into().tokens());

        for i in 0..self.num_hashes as u64 {
            let loc = self.location(&h, i);
            self.bits.set(loc, true);
        }

        true
    }

    /// Check if a key might be in the filter
    /// Returns true if the key might be present (with possible false positives)
    /// Returns false if the key is definitely not present
    pub fn test<'a>(&self, data: impl Into<Input<'a>>) -> bool {
        let h = hash::base_hashes(&data.into().tokens());

        for i in 0..self.num_hashes as u64 {
            if !self.bits.get(self.location(&h, i)).unwrap_or(false) {
                return false;
            }
        }

        true
    }

    /// Base64 encoding of the filter state (see [`crate::codec`])
    pub fn encode_base64(&self) -> String {
        codec::encode_base64(&self.bits)
    }

    /// The filter as a `{m, k, b}` value
    pub fn to_json_object(&self) -> FilterJson {
        FilterJson {
            m: self.bits.len() as u64,
            k: self.num_hashes as u64,
            b: self.encode_base64(),
        }
    }

    /// The filter serialized as JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json_object())?)
    }

    /// Get the bit array length (m)
    pub fn m(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of probes per key (k)
    pub fn k(&self) -> usize {
        self.num_hashes
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.iter().filter(|&bit| bit).count()
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        self.bits_set() as f64 / self.bits.len() as f64
    }

    /// Get the estimated false positive rate
    pub fn estimated_fpr(&self) -> f64 {
        self.load_factor().powi(self.num_hashes as i32)
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        BloomStats {
            num_bits: self.bits.len(),
            num_hashes: self.num_hashes,
            bits_set: self.bits_set(),
            load_factor: self.load_factor(),
            estimated_fpr: self.estimated_fpr(),
        }
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone)]
pub struct BloomStats {
    pub num_bits: usize,
    pub num_hashes: usize,
    pub bits_set: usize,
    pub load_factor: f64,
    pub estimated_fpr: f64,
}

impl std::fmt::Display for BloomStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Size: {} bits\n\
             - Hash functions: {}\n\
             - Bits set: {}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.num_bits, self.num_hashes, self.bits_set, self.load_factor, self.estimated_fpr
        )
    }
}
