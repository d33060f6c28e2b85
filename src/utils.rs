//! Utility functions for Bloom filters

use crate::{BloomerError, Result};
use std::f64::consts::LN_2;

/// Largest bit array a filter may allocate (just under 512 MiB of bits)
pub const MAX_NUM_BITS: usize = u32::MAX as usize;

/// Largest probe count per operation
pub const MAX_NUM_HASHES: usize = 1 << 12;

/// Bloom filter parameters derived from an expected element count and
/// a target false positive rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomParameters {
    /// Bit array length (m)
    pub num_bits: usize,
    /// Probe count per operation (k)
    pub num_hashes: usize,
}

/// Calculate the bit array size and probe count for the given constraints
///
/// # Arguments
/// * `expected_elements` - Expected number of elements to insert (n)
/// * `desired_fpr` - Target false positive probability, strictly between 0 and 1
///
/// Formulas:
/// - m = ceil(-n * ln(p) / (ln(2))^2)
/// - k = ceil(ln(2) * m / n)
pub fn estimate_parameters(expected_elements: f64, desired_fpr: f64) -> Result<BloomParameters> {
    if !expected_elements.is_finite() || expected_elements <= 0.0 {
        return Err(BloomerError::InvalidParameter(format!(
            "Expected element count must be > 0, got {}",
            expected_elements
        )));
    }
    if desired_fpr.is_nan() || desired_fpr <= 0.0 || desired_fpr >= 1.0 {
        return Err(BloomerError::InvalidParameter(format!(
            "False positive rate must be in (0, 1), got {}",
            desired_fpr
        )));
    }

    let n = expected_elements;
    let ln2_squared = LN_2 * LN_2;
    let bits = (-n * desired_fpr.ln() / ln2_squared).ceil();
    if !bits.is_finite() || bits > MAX_NUM_BITS as f64 {
        return Err(BloomerError::InvalidParameter(format!(
            "Bit array of {} bits exceeds the {} bit limit",
            bits, MAX_NUM_BITS
        )));
    }
    let num_bits = bits as usize;

    let hashes = (LN_2 * num_bits as f64 / n).ceil();
    if !hashes.is_finite() || hashes > MAX_NUM_HASHES as f64 {
        return Err(BloomerError::InvalidParameter(format!(
            "Probe count {} exceeds the limit of {}",
            hashes, MAX_NUM_HASHES
        )));
    }
    let num_hashes = hashes as usize;

    check_parameters(num_bits, num_hashes)?;

    Ok(BloomParameters {
        num_bits,
        num_hashes,
    })
}

/// Validate explicit filter parameters against the allocation and probe limits
pub fn check_parameters(num_bits: usize, num_hashes: usize) -> Result<()> {
    if num_bits == 0 || num_bits > MAX_NUM_BITS {
        return Err(BloomerError::InvalidParameter(format!(
            "Bit count must be in 1..={}, got {}",
            MAX_NUM_BITS, num_bits
        )));
    }
    if num_hashes == 0 || num_hashes > MAX_NUM_HASHES {
        return Err(BloomerError::InvalidParameter(format!(
            "Number of hashes must be in 1..={}, got {}",
            MAX_NUM_HASHES, num_hashes
        )));
    }
    Ok(())
}
