//! Constant-time byte comparison for derived keys.

/// Compare two byte slices without an early exit.
///
/// The accumulator starts as `a.len() ^ b.len()`, then every byte pair over
/// the shorter length is XOR-ed into it. Running time depends only on the
/// lengths, never on where the contents first differ. Unequal lengths
/// return `false` without indexing past either slice.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= usize::from(x ^ y);
    }
    std::hint::black_box(diff) == 0
}
