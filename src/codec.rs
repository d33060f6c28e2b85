//! Portable wire format for Bloom filter state
//!
//! Layout of the encoded bytes:
//!
//! ```text
//! +----------------------+------------------------------------------+
//! | m (u64, big endian)  | m / 64 + 1 words, each 8 bytes, BE       |
//! +----------------------+------------------------------------------+
//! ```
//!
//! Bit `i` of the filter lands in bit `i % 64` of word `i / 64`. The bit
//! string always gains between 1 and 64 zero bits of padding, so a filter
//! whose size is a multiple of 64 carries one trailing all-zero word. The byte string is then base64 encoded
//! with the URL-safe alphabet and `=` padding. There is no decoder.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

/// Bits per packed word
pub const WORD_BITS: usize = 64;

/// Size of the `m` header in bytes
pub const HEADER_LEN: usize = 8;

/// JSON shape of an encoded filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterJson {
    /// Bit array length
    pub m: u64,
    /// Probe count
    pub k: u64,
    /// Base64 encoding of the filter state
    pub b: String,
}

/// Stage one: append `64 - m % 64` zero bits and fold each 64-bit chunk
/// into a word, first bit least significant.
pub fn pack_words(bits: &BitVec) -> Vec<u64> {
    let mut words = vec![0u64; bits.len() / WORD_BITS + 1];
    for (i, bit) in bits.iter().enumerate() {
        if bit {
            words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
        }
    }
    words
}

/// Stage two: emit every word most significant byte first, which is the
/// byte sequence of the reversed chunk read eight bits at a time.
pub fn words_to_bytes(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}

/// Header followed by the packed payload
pub fn encode_bytes(bits: &BitVec) -> Vec<u8> {
    let words = pack_words(bits);
    let mut out = Vec::with_capacity(HEADER_LEN + words.len() * 8);
    out.extend_from_slice(&(bits.len() as u64).to_be_bytes());
    out.extend_from_slice(&words_to_bytes(&words));
    out
}

/// Base64 (URL-safe, padded) encoding of [`encode_bytes`]
pub fn encode_base64(bits: &BitVec) -> String {
    let bytes = encode_bytes(bits);
    tracing::trace!(
        bits = bits.len(),
        bytes = bytes.len(),
        "encoded bloom filter"
    );
    URL_SAFE.encode(bytes)
}
