//! Sizing math for Bloom filters

use std::f64::consts::LN_2;

/// Largest hash count addressable by the single index byte appended to each element.
pub const MAX_HASH_COUNT: u8 = u8::MAX;

/// Optimal length of the bit array for `n` elements at false positive rate `prob`.
///
/// m = ceil(-n * ln(p) / (ln(2))^2)
///
/// Returns 0 when `n` is 0; callers must reject that case themselves.
pub fn optimal_bit_len(n: u32, prob: f64) -> u64 {
    let ln2_squared = LN_2 * LN_2;
    let bits = -(n as f64) * prob.ln() / ln2_squared;
    bits.ceil() as u64
}

/// Optimal number of hash functions for false positive rate `prob`.
///
/// k = ceil(-ln(p) / ln(2)), saturated into the range of the index byte.
/// Independent of the number of elements.
pub fn optimal_hash_count(prob: f64) -> u8 {
    raw_hash_count(prob).clamp(0.0, MAX_HASH_COUNT as f64) as u8
}

/// Unclamped k, used to detect probabilities too close to zero.
pub(crate) fn raw_hash_count(prob: f64) -> f64 {
    (-prob.ln() / LN_2).ceil()
}

/// Theoretical false positive rate of a filter with `m` bits and `k` hashes
/// holding `n` elements.
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn expected_fpr(m: u64, n: u64, k: u8) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_bit_len() {
        let cases: [(u32, f64, u64); 8] = [
            (1_000_000, 0.01, 9_585_059), // 1.198 MB
            (0, 0.01, 0),
            (2_147_483_647, 0.01, 20_583_756_121), // 2.573 GB
            (4_294_967_295, 0.01, 41_167_512_252), // 5.146 GB
            (4_294_967_295, 0.001, 61_751_268_378),
            (1, 0.01, 10),
            (6, 0.01, 58),
            (7, 0.01, 68),
        ];

        for (n, prob, want) in cases {
            assert_eq!(
                optimal_bit_len(n, prob),
                want,
                "optimal_bit_len({}, {})",
                n,
                prob
            );
        }
    }

    #[test]
    fn test_optimal_hash_count() {
        let cases = [
            (0.1, 4),
            (0.01, 7),
            (0.0123, 7),
            (0.001, 10),
            (0.0001001231231, 14),
        ];

        for (prob, want) in cases {
            assert_eq!(optimal_hash_count(prob), want, "optimal_hash_count({})", prob);
        }
    }

    #[test]
    fn test_optimal_hash_count_saturates() {
        assert_eq!(optimal_hash_count(1e-300), MAX_HASH_COUNT);
        assert!(raw_hash_count(1e-300) > MAX_HASH_COUNT as f64);

        // p >= 1 needs no hashing at all
        assert_eq!(optimal_hash_count(1.0), 0);
        assert_eq!(optimal_hash_count(2.0), 0);
    }

    #[test]
    fn test_bit_len_covers_capacity() {
        for prob in [0.5, 0.1, 0.01, 0.001, 0.000_001] {
            for n in [1u32, 7, 100, 10_000, u32::MAX] {
                assert!(optimal_bit_len(n, prob) >= n as u64);
                assert!(optimal_hash_count(prob) >= 1);
            }
        }
    }

    #[test]
    fn test_expected_fpr_meets_target() {
        let n = 10_000;
        let m = optimal_bit_len(n, 0.01);
        let k = optimal_hash_count(0.01);

        let fpr = expected_fpr(m, n as u64, k);
        assert!(fpr > 0.005 && fpr < 0.011, "Expected FPR≈0.01, got {}", fpr);
        assert_eq!(expected_fpr(0, 10, 3), 1.0);
    }
}
