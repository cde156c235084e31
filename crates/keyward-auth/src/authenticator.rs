//! Enrollment and verification of stored password records.
//!
//! [`Authenticator`] wraps a [`PasswordHasher`] configured from a
//! [`HashingPolicy`] and decides when a verified record must be replaced:
//! its cost is below policy, or it only matched under the legacy PRF.
//! The caller persists the returned replacement; this type does no I/O.

use keyward_crypto_core::{Pbkdf2Params, PasswordHasher, PasswordRecord};

use crate::error::AuthError;
use crate::policy::HashingPolicy;

/// Outcome of a successful verification call.
///
/// A malformed record is never a `Verification`; it is an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Verification {
    /// Password matched; the stored record is current.
    Match,
    /// Password matched; the caller must store `record` in place of the old one.
    MatchRehashed {
        /// Freshly hashed record under the current policy.
        record: String,
    },
    /// Wrong password.
    Mismatch,
}

impl Verification {
    /// Returns `true` for either matching variant.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::Mismatch)
    }

    /// The replacement record, if one was produced.
    #[must_use]
    pub fn rehashed_record(&self) -> Option<&str> {
        match self {
            Self::MatchRehashed { record } => Some(record),
            Self::Match | Self::Mismatch => None,
        }
    }
}

/// Policy-driven password authenticator. `Send + Sync`; share via `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    primary: PasswordHasher,
    legacy: Option<PasswordHasher>,
    rehash_on_login: bool,
}

impl Authenticator {
    /// Build an authenticator from `policy`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if the policy does not validate.
    pub fn new(policy: &HashingPolicy) -> Result<Self, AuthError> {
        policy.validate()?;
        let primary = PasswordHasher::new(policy.params())?;
        // The legacy hasher only ever re-derives at each record's own cost,
        // so its configured iteration count is irrelevant beyond validation.
        let legacy = policy
            .legacy_prf
            .map(|prf| {
                PasswordHasher::new(Pbkdf2Params {
                    prf,
                    iterations: policy.iterations,
                })
            })
            .transpose()?;

        tracing::debug!(
            prf = %policy.prf,
            iterations = policy.iterations,
            legacy_prf = ?policy.legacy_prf,
            rehash_on_login = policy.rehash_on_login,
            "authenticator configured"
        );

        Ok(Self {
            primary,
            legacy,
            rehash_on_login: policy.rehash_on_login,
        })
    }

    /// Hash a new password for storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Crypto` if salt generation fails.
    pub fn enroll(&self, password: &str) -> Result<String, AuthError> {
        let encoded = self.primary.hash_encoded(password)?;
        tracing::debug!(iterations = self.primary.params().iterations, "password enrolled");
        Ok(encoded)
    }

    /// Verify `password` against the `stored` record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Crypto(CryptoError::MalformedRecord(_))` if
    /// `stored` is corrupt, and `AuthError::Crypto` if producing a
    /// replacement record fails.
    pub fn verify(&self, password: &str, stored: &str) -> Result<Verification, AuthError> {
        let record: PasswordRecord = stored.parse().map_err(|e| {
            tracing::warn!(error = %e, "stored password record is malformed");
            AuthError::from(e)
        })?;

        if self.primary.verify_record(password, &record)? {
            if self.rehash_on_login && self.primary.needs_rehash(&record) {
                return self.rehash(password, &record, "cost parameter upgraded");
            }
            return Ok(Verification::Match);
        }

        if let Some(legacy) = &self.legacy {
            if legacy.verify_record(password, &record)? {
                if self.rehash_on_login {
                    return self.rehash(password, &record, "legacy PRF record migrated");
                }
                return Ok(Verification::Match);
            }
        }

        tracing::debug!("password mismatch");
        Ok(Verification::Mismatch)
    }

    /// Whether `stored` would be replaced on its next successful login
    /// under the primary PRF.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Crypto` if `stored` is malformed.
    pub fn needs_rehash(&self, stored: &str) -> Result<bool, AuthError> {
        let record: PasswordRecord = stored.parse()?;
        Ok(self.primary.needs_rehash(&record))
    }

    fn rehash(
        &self,
        password: &str,
        old: &PasswordRecord,
        reason: &'static str,
    ) -> Result<Verification, AuthError> {
        let record = self.primary.hash_encoded(password)?;
        tracing::info!(
            old_iterations = old.iterations(),
            new_iterations = self.primary.params().iterations,
            reason,
            "password record rehashed"
        );
        Ok(Verification::MatchRehashed { record })
    }
}
