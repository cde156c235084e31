//! Entropy quality of hasher salts.
//!
//! Salts are 24 bytes, far too short for a meaningful per-salt entropy
//! estimate, so these tests pool many salts before measuring. Uniform random
//! data over 24 KB should sit close to 8.0 bits/byte; 7.9 is a threshold
//! that only degenerate output (zero fill, counters, repeats) falls under.

use keyward_crypto_core::PasswordHasher;

/// Shannon entropy of a byte slice (bits per byte).
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn pooled_salts_have_high_entropy() {
    let hasher = PasswordHasher::legacy();
    let mut pool = Vec::with_capacity(1_000 * 24);
    for _ in 0..1_000 {
        let record = hasher.hash("x").unwrap();
        pool.extend_from_slice(record.salt());
    }
    let entropy = shannon_entropy(&pool);
    assert!(entropy > 7.9, "pooled salt entropy too low: {entropy:.4} bits/byte");
}

#[test]
fn salt_is_never_all_zero() {
    let hasher = PasswordHasher::legacy();
    for _ in 0..100 {
        let record = hasher.hash("x").unwrap();
        assert!(record.salt().iter().any(|&b| b != 0));
    }
}

#[test]
fn shannon_entropy_of_constant_data_is_zero() {
    assert!(shannon_entropy(&[0x42; 1024]).abs() < f64::EPSILON);
}
