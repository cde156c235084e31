//! Error types for `keyward-auth`.

use keyward_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by enrollment, verification, and policy handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Cryptographic operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Hashing policy is invalid or could not be parsed.
    #[error("invalid hashing policy: {0}")]
    Config(String),

    /// I/O error while reading or writing the policy file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Returns `true` if the stored record is corrupt, as opposed to a
    /// wrong password (which is not an error) or a local failure.
    #[must_use]
    pub const fn is_malformed_record(&self) -> bool {
        matches!(self, Self::Crypto(e) if e.is_malformed_record())
    }
}
