//! Fast content digest for identity checks and fingerprinting.
//!
//! Single-pass, unsalted BLAKE3 rendered as lowercase hex. This is a
//! checksum, NOT a password hash: it has no salt and no work factor.
//! Use [`PasswordHasher`](crate::PasswordHasher) for credentials.

use std::fmt;
use std::str::FromStr;

use crate::compare::constant_time_eq;
use crate::error::CryptoError;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// A content fingerprint. Not interchangeable with
/// [`PasswordRecord`](crate::PasswordRecord).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; DIGEST_LEN]);

impl ContentDigest {
    /// Digest of the UTF-8 bytes of `text`.
    #[must_use]
    pub fn of(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex rendering, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        data_encoding::HEXLOWER.encode(&self.0)
    }

    /// Whether `text` hashes to this digest.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        constant_time_eq(Self::of(text).as_bytes(), &self.0)
    }
}

/// Hex digest of `text`. Not for passwords.
#[must_use]
pub fn digest(text: &str) -> String {
    ContentDigest::of(text).to_hex()
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let bytes = data_encoding::HEXLOWER
            .decode(lower.as_bytes())
            .map_err(|e| CryptoError::InvalidDigest(format!("invalid hex: {e}")))?;
        let array: [u8; DIGEST_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            CryptoError::InvalidDigest(format!(
                "expected {DIGEST_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(array))
    }
}
