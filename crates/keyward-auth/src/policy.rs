//! Hashing policy — stored as plain JSON next to the credential store.
//!
//! The policy picks the PRF and cost for new records and controls how old
//! records are upgraded. It lives outside the records themselves because
//! the record format has no PRF field.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use keyward_crypto_core::{Pbkdf2Params, PasswordHasher, Prf, DEFAULT_ITERATIONS};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// File name of the policy inside the config directory.
pub const POLICY_FILE: &str = "hashing-policy.json";

/// Password hashing policy.
///
/// Persisted to `{config_dir}/hashing-policy.json`. All fields have
/// defaults, so a partial file is valid; unknown fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HashingPolicy {
    /// PRF for new records and the first verification attempt.
    #[serde(default)]
    pub prf: Prf,

    /// Iteration count for new records.
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// PRF tried when a record does not match under `prf`. Set this to
    /// `"hmac-sha1"` while migrating a store of legacy records.
    #[serde(default)]
    pub legacy_prf: Option<Prf>,

    /// Replace outdated records after a successful verification.
    #[serde(default = "default_rehash_on_login")]
    pub rehash_on_login: bool,
}

impl Default for HashingPolicy {
    fn default() -> Self {
        Self {
            prf: Prf::default(),
            iterations: default_iterations(),
            legacy_prf: None,
            rehash_on_login: default_rehash_on_login(),
        }
    }
}

const fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}
const fn default_rehash_on_login() -> bool {
    true
}

impl HashingPolicy {
    /// Parameters for new records.
    #[must_use]
    pub const fn params(&self) -> Pbkdf2Params {
        Pbkdf2Params {
            prf: self.prf,
            iterations: self.iterations,
        }
    }

    /// Check that the policy can build a hasher.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if the iteration count is out of range
    /// or `legacy_prf` equals `prf`.
    pub fn validate(&self) -> Result<(), AuthError> {
        PasswordHasher::new(self.params()).map_err(|e| AuthError::Config(e.to_string()))?;
        if self.legacy_prf == Some(self.prf) {
            return Err(AuthError::Config(format!(
                "legacyPrf must differ from prf ({})",
                self.prf
            )));
        }
        Ok(())
    }

    /// Load the policy from `{config_dir}/hashing-policy.json`.
    ///
    /// A missing file yields [`Default::default()`]. A file that exists but
    /// does not parse or validate is an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Io` if the file cannot be read and
    /// `AuthError::Config` if it is not a valid policy.
    pub fn load(config_dir: &Path) -> Result<Self, AuthError> {
        let path = config_dir.join(POLICY_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no hashing policy file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let policy: Self = serde_json::from_str(&contents)
            .map_err(|e| AuthError::Config(format!("{}: {e}", path.display())))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Persist the policy to `{config_dir}/hashing-policy.json`.
    ///
    /// Writes to a `.tmp` file and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, config_dir: &Path) -> std::io::Result<()> {
        let path = config_dir.join(POLICY_FILE);
        let tmp = config_dir.join(".hashing-policy.json.tmp");

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────
