//! Password hasher and verifier.
//!
//! [`PasswordHasher::hash`] salts and stretches a password into a
//! [`PasswordRecord`]; [`PasswordHasher::verify`] re-derives from a stored
//! record and compares in constant time.
//!
//! A malformed record is an `Err`, never `Ok(false)`: callers must be able
//! to tell storage corruption apart from a wrong password.

use crate::compare::constant_time_eq;
use crate::error::CryptoError;
use crate::kdf::{self, Pbkdf2Params, LEGACY_ITERATIONS, MAX_RECORD_ITERATIONS};
use crate::memory::SecretBytes;
use crate::record::{PasswordRecord, KEY_LEN, SALT_LEN};

/// Stateless PBKDF2 password hasher. `Send + Sync`; share freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordHasher {
    params: Pbkdf2Params,
}

impl PasswordHasher {
    /// Build a hasher for `params`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` if the iteration count is below
    /// [`LEGACY_ITERATIONS`] or above [`MAX_RECORD_ITERATIONS`], since records
    /// outside that range would be rejected on verification.
    pub fn new(params: Pbkdf2Params) -> Result<Self, CryptoError> {
        if params.iterations < LEGACY_ITERATIONS {
            return Err(CryptoError::KeyDerivation(format!(
                "iteration count {} below minimum {LEGACY_ITERATIONS}",
                params.iterations
            )));
        }
        if params.iterations > MAX_RECORD_ITERATIONS {
            return Err(CryptoError::KeyDerivation(format!(
                "iteration count {} above maximum {MAX_RECORD_ITERATIONS}",
                params.iterations
            )));
        }
        Ok(Self { params })
    }

    /// Hasher for the original HMAC-SHA1 / 1000-iteration records.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            params: Pbkdf2Params::legacy(),
        }
    }

    #[must_use]
    pub const fn params(&self) -> &Pbkdf2Params {
        &self.params
    }

    /// Hash `password` under a fresh 24-byte salt.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EntropySource` if the OS CSPRNG fails.
    pub fn hash(&self, password: &str) -> Result<PasswordRecord, CryptoError> {
        let salt = SecretBytes::<SALT_LEN>::random()?;
        let key = kdf::derive(password.as_bytes(), salt.expose(), &self.params, KEY_LEN)?;
        PasswordRecord::new(
            self.params.iterations,
            salt.expose().to_vec(),
            key.expose().to_vec(),
        )
    }

    /// [`hash`](Self::hash), returned in storage form.
    ///
    /// # Errors
    ///
    /// Same as [`hash`](Self::hash).
    pub fn hash_encoded(&self, password: &str) -> Result<String, CryptoError> {
        self.hash(password).map(|record| record.encode())
    }

    /// Check `password` against an encoded record.
    ///
    /// Returns `Ok(true)` only on an exact match.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MalformedRecord` if `encoded` does not parse.
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, CryptoError> {
        let record: PasswordRecord = encoded.parse()?;
        self.verify_record(password, &record)
    }

    /// Check `password` against an already-parsed record.
    ///
    /// The stored iteration count and key length are used, so records from
    /// older cost settings keep verifying.
    ///
    /// # Errors
    ///
    /// Propagates derivation errors. A record built through
    /// [`PasswordRecord::new`] or parsing always derives.
    pub fn verify_record(&self, password: &str, record: &PasswordRecord) -> Result<bool, CryptoError> {
        let params = Pbkdf2Params {
            prf: self.params.prf,
            iterations: record.iterations(),
        };
        let candidate = kdf::derive(
            password.as_bytes(),
            record.salt(),
            &params,
            record.derived_key().len(),
        )?;
        Ok(constant_time_eq(candidate.expose(), record.derived_key()))
    }

    /// Whether `record` should be replaced after the next successful login:
    /// cost below this hasher's, or salt/key length not the current default.
    #[must_use]
    pub fn needs_rehash(&self, record: &PasswordRecord) -> bool {
        record.iterations() < self.params.iterations
            || record.salt().len() != SALT_LEN
            || record.derived_key().len() != KEY_LEN
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Pbkdf2Params::default(),
        }
    }
}
