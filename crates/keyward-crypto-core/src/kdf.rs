//! PBKDF2 key derivation with a selectable PRF.
//!
//! This module provides:
//! - [`derive`] — stretch a password + salt into a key of the requested length
//! - [`calibrate`] — benchmark hardware and return an iteration count for a target duration
//! - [`Pbkdf2Params`] — parameter set (PRF + iterations)
//! - [`Prf`] — HMAC-SHA1 / HMAC-SHA256 / HMAC-SHA512 selector
//!
//! # Cost Parameter
//!
//! The iteration count is stored per record, so it can be raised over time
//! without invalidating older records. [`LEGACY_ITERATIONS`] is the cost of
//! the original HMAC-SHA1 records and is only accepted as a migration floor.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use ring::pbkdf2;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::memory::SecretBuffer;

/// Iteration count of legacy HMAC-SHA1 records. Lowest cost a hasher accepts.
pub const LEGACY_ITERATIONS: u32 = 1_000;

/// Default iteration count for HMAC-SHA256.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Highest iteration count a stored record may carry.
pub const MAX_RECORD_ITERATIONS: u32 = 10_000_000;

/// Longest derived key accepted, in bytes.
pub const MAX_DERIVED_KEY_LEN: usize = 64;

/// Iterations run by the calibration probe.
const PROBE_ITERATIONS: u32 = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Pseudorandom function used inside PBKDF2.
///
/// Not stored in the record; it is a deployment-wide hasher setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prf {
    /// HMAC-SHA1, the legacy construction.
    #[serde(rename = "hmac-sha1")]
    HmacSha1,
    /// HMAC-SHA256.
    #[default]
    #[serde(rename = "hmac-sha256")]
    HmacSha256,
    /// HMAC-SHA512.
    #[serde(rename = "hmac-sha512")]
    HmacSha512,
}

impl Prf {
    fn algorithm(self) -> pbkdf2::Algorithm {
        match self {
            Self::HmacSha1 => pbkdf2::PBKDF2_HMAC_SHA1,
            Self::HmacSha256 => pbkdf2::PBKDF2_HMAC_SHA256,
            Self::HmacSha512 => pbkdf2::PBKDF2_HMAC_SHA512,
        }
    }

    /// Name used in configuration files and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha1 => "hmac-sha1",
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
        }
    }
}

impl std::fmt::Display for Prf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Prf {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hmac-sha1" => Ok(Self::HmacSha1),
            "hmac-sha256" => Ok(Self::HmacSha256),
            "hmac-sha512" => Ok(Self::HmacSha512),
            other => Err(CryptoError::KeyDerivation(format!(
                "unknown PRF `{other}` (expected hmac-sha1, hmac-sha256 or hmac-sha512)"
            ))),
        }
    }
}

/// PBKDF2 parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// PRF inside each PBKDF2 block.
    pub prf: Prf,
    /// Number of PRF rounds.
    pub iterations: u32,
}

impl Pbkdf2Params {
    /// The original construction: HMAC-SHA1, 1000 iterations.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            prf: Prf::HmacSha1,
            iterations: LEGACY_ITERATIONS,
        }
    }
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            prf: Prf::HmacSha256,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive `out_len` bytes from `password` and `salt`.
///
/// Accepts any password, including empty. Strength rules belong to the
/// caller.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if:
/// - `params.iterations` is zero
/// - the salt is empty
/// - `out_len` is zero or above [`MAX_DERIVED_KEY_LEN`]
pub fn derive(
    password: &[u8],
    salt: &[u8],
    params: &Pbkdf2Params,
    out_len: usize,
) -> Result<SecretBuffer, CryptoError> {
    let iterations = NonZeroU32::new(params.iterations)
        .ok_or_else(|| CryptoError::KeyDerivation("iteration count must be positive".into()))?;
    if salt.is_empty() {
        return Err(CryptoError::KeyDerivation("salt must not be empty".into()));
    }
    if out_len == 0 || out_len > MAX_DERIVED_KEY_LEN {
        return Err(CryptoError::KeyDerivation(format!(
            "unsupported output length: {out_len} bytes (1..={MAX_DERIVED_KEY_LEN})"
        )));
    }

    let mut output = vec![0u8; out_len];
    pbkdf2::derive(params.prf.algorithm(), iterations, salt, password, &mut output);
    let result = SecretBuffer::new(&output);
    output.zeroize();
    Ok(result)
}

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------

/// Benchmark `prf` and return an iteration count that takes roughly
/// `target` per derivation on this machine.
///
/// The result is clamped to `LEGACY_ITERATIONS..=MAX_RECORD_ITERATIONS`.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if `target` is zero.
pub fn calibrate(prf: Prf, target: Duration) -> Result<u32, CryptoError> {
    if target.is_zero() {
        return Err(CryptoError::KeyDerivation(
            "calibration target must be positive".into(),
        ));
    }

    let probe = Pbkdf2Params {
        prf,
        iterations: PROBE_ITERATIONS,
    };
    let start = Instant::now();
    let key = derive(b"calibration_probe", b"calibration_salt_24bytes", &probe, 20)?;
    let elapsed = start.elapsed();
    std::hint::black_box(key.len());

    Ok(scale_iterations(PROBE_ITERATIONS, elapsed, target))
}

/// Scale `probe_iterations` measured over `elapsed` to fill `target`.
fn scale_iterations(probe_iterations: u32, elapsed: Duration, target: Duration) -> u32 {
    let elapsed_ns = elapsed.as_nanos().max(1);
    let scaled = target
        .as_nanos()
        .checked_mul(u128::from(probe_iterations))
        .and_then(|n| n.checked_div(elapsed_ns))
        .unwrap_or(u128::from(MAX_RECORD_ITERATIONS));
    let clamped = scaled.clamp(
        u128::from(LEGACY_ITERATIONS),
        u128::from(MAX_RECORD_ITERATIONS),
    );
    u32::try_from(clamped).unwrap_or(MAX_RECORD_ITERATIONS)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
