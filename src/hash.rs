//! Hash functions for Bloom filters
//!
//! Four seeded FNV-1a hashes are stretched into k probe locations with an
//! enhanced double hashing scheme. All arithmetic wraps at 64 bits.

/// FNV-1a 64-bit offset basis
pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 1099511628211;

/// Number of seeded base hashes computed per key
pub const NUM_BASE_HASHES: usize = 4;

/// The seeded base hashes of a key
pub type BaseHashes = [u64; NUM_BASE_HASHES];

/// FNV-1a over a token sequence, with the offset basis shifted by `seed`
///
/// Each token is folded in whole (not split into bytes), so a token above 255
/// such as a non-ASCII character code still contributes a single XOR step.
pub fn fnv64_hash(seed: u64, tokens: &[u64]) -> u64 {
    tokens
        .iter()
        .fold(seed.wrapping_add(FNV_OFFSET_BASIS), |hash, &token| {
            (hash ^ token).wrapping_mul(FNV_PRIME)
        })
}

/// Compute the four base hashes of a token sequence (seeds 0 through 3)
pub fn base_hashes(tokens: &[u64]) -> BaseHashes {
    let mut hashes = [0u64; NUM_BASE_HASHES];
    for (seed, slot) in hashes.iter_mut().enumerate() {
        *slot = fnv64_hash(seed as u64, tokens);
    }
    hashes
}

/// Derive the `i`-th probe location in a bit array of `modulus` bits
///
/// Even probes start from `h[0]`, odd ones from `h[1]`; the step alternates
/// between `h[2]` and `h[3]` in the pattern 2, 3, 3, 2 over every four probes.
pub fn location(h: &BaseHashes, i: u64, modulus: u64) -> u64 {
    if modulus == 0 {
        return 0;
    }

    let a = (i % 2) as usize;
    let b = 2 + (((i.wrapping_add(i % 2)) % 4) / 2) as usize;
    h[a].wrapping_add(i.wrapping_mul(h[b])) % modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv64_hash_empty_input() {
        // Only the seed contributes when there are no tokens
        assert_eq!(fnv64_hash(0, &[]), FNV_OFFSET_BASIS);
        assert_eq!(fnv64_hash(3, &[]), FNV_OFFSET_BASIS + 3);
    }

    #[test]
    fn test_fnv64_hash_seed_wraps() {
        assert_eq!(fnv64_hash(u64::MAX, &[]), FNV_OFFSET_BASIS - 1);
    }

    #[test]
    fn test_fnv64_hash_matches_reference_fnv1a() {
        use std::hash::Hasher;

        let data = b"the quick brown fox";
        let tokens: Vec<u64> = data.iter().map(|&b| b as u64).collect();

        let mut reference = fnv::FnvHasher::default();
        reference.write(data);
        assert_eq!(fnv64_hash(0, &tokens), reference.finish());

        let mut seeded = fnv::FnvHasher::with_key(FNV_OFFSET_BASIS + 2);
        seeded.write(data);
        assert_eq!(fnv64_hash(2, &tokens), seeded.finish());
    }

    #[test]
    fn test_base_hashes_use_distinct_seeds() {
        let h = base_hashes(&[1, 2, 3]);
        for (seed, value) in h.iter().enumerate() {
            assert_eq!(*value, fnv64_hash(seed as u64, &[1, 2, 3]));
        }
    }

    #[test]
    fn test_location_step_pattern() {
        // Distinct powers of two make the chosen base hashes visible
        let h: BaseHashes = [0, 1 << 20, 1, 1 << 10];
        let modulus = u64::MAX;

        assert_eq!(location(&h, 0, modulus), 0);
        assert_eq!(location(&h, 1, modulus), (1 << 20) + (1 << 10));
        assert_eq!(location(&h, 2, modulus), 2 << 10);
        assert_eq!(location(&h, 3, modulus), (1 << 20) + 3);
        assert_eq!(location(&h, 4, modulus), 4);
        assert_eq!(location(&h, 5, modulus), (1 << 20) + (5 << 10));
    }

    #[test]
    fn test_location_wraps_before_reduction() {
        let h: BaseHashes = [u64::MAX, 0, 0, u64::MAX];
        // u64::MAX + 2 * u64::MAX wraps to u64::MAX - 2
        assert_eq!(location(&h, 2, 1000), (u64::MAX - 2) % 1000);
    }

    #[test]
    fn test_location_in_range() {
        let h = base_hashes(&[9, 8, 7]);
        for i in 0..64 {
            assert!(location(&h, i, 97) < 97);
        }
        assert_eq!(location(&h, 5, 0), 0);
    }
}
