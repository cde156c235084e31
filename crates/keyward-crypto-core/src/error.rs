//! Cryptographic error types for `keyward-crypto-core`.

use thiserror::Error;

/// Errors produced by password hashing, verification, and digest parsing.
///
/// A wrong password is never an error: verification returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The OS CSPRNG could not produce salt bytes. Fatal, never retried
    /// with a weaker source.
    #[error("entropy source failure: {0}")]
    EntropySource(String),

    /// A stored record does not parse into `iterations:salt:key`.
    #[error("malformed password record: {0}")]
    MalformedRecord(String),

    /// PBKDF2 parameter validation failed (zero iterations, empty salt,
    /// unsupported output length, cost below the legacy floor).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// A hex string could not be parsed as a content digest.
    #[error("invalid content digest: {0}")]
    InvalidDigest(String),

    /// Secure memory allocation failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}

impl CryptoError {
    /// Returns `true` if this error means the stored record is corrupt,
    /// as opposed to a configuration or platform failure.
    #[must_use]
    pub const fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }
}
