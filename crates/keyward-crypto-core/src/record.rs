//! Encoded password record: `iterations:base64(salt):base64(derived_key)`.
//!
//! This is the only persisted form of a password. The text layout is fixed
//! for compatibility with records already in storage and must not change.
//!
//! ```text
//! 600000:AAECAwQFBgcICQoLDA0ODxAREhMUFRYX:OF0W3iTI22kTK2fqizLus+BhyvM=
//! ^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! cost   24-byte salt, padded base64      20-byte key, padded base64
//! ```

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;
use crate::kdf::{MAX_DERIVED_KEY_LEN, MAX_RECORD_ITERATIONS};

/// Salt length written by the hasher.
pub const SALT_LEN: usize = 24;

/// Derived key length written by the hasher.
pub const KEY_LEN: usize = 20;

const DELIMITER: char = ':';

/// A parsed password record.
///
/// Immutable once built. A password change or cost upgrade produces a new
/// record rather than editing this one.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PasswordRecord {
    #[zeroize(skip)]
    iterations: u32,
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl PasswordRecord {
    /// Assemble a record from its parts, applying the same checks as parsing.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MalformedRecord` if the iteration count is zero
    /// or above the record ceiling, the salt is empty, or the key is empty
    /// or longer than the supported maximum.
    pub fn new(iterations: u32, salt: Vec<u8>, derived_key: Vec<u8>) -> Result<Self, CryptoError> {
        if iterations == 0 {
            return Err(malformed("iteration count must be positive"));
        }
        if iterations > MAX_RECORD_ITERATIONS {
            return Err(malformed(&format!(
                "iteration count {iterations} exceeds maximum {MAX_RECORD_ITERATIONS}"
            )));
        }
        if salt.is_empty() {
            return Err(malformed("salt field is empty"));
        }
        if derived_key.is_empty() || derived_key.len() > MAX_DERIVED_KEY_LEN {
            return Err(malformed(&format!(
                "derived key length {} outside 1..={MAX_DERIVED_KEY_LEN}",
                derived_key.len()
            )));
        }
        Ok(Self {
            iterations,
            salt,
            derived_key,
        })
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    #[must_use]
    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }

    /// Render the storage string. Same as `to_string()`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

fn malformed(reason: &str) -> CryptoError {
    CryptoError::MalformedRecord(reason.to_string())
}

fn parse_iterations(field: &str) -> Result<u32, CryptoError> {
    // u32::from_str accepts a leading '+', which no writer ever produced.
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("iteration field is not a decimal integer"));
    }
    field
        .parse::<u32>()
        .map_err(|e| CryptoError::MalformedRecord(format!("iteration field out of range: {e}")))
}

fn decode_field(field: &str, name: &str) -> Result<Vec<u8>, CryptoError> {
    data_encoding::BASE64
        .decode(field.as_bytes())
        .map_err(|e| CryptoError::MalformedRecord(format!("invalid Base64 in {name}: {e}")))
}

impl FromStr for PasswordRecord {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        let [iterations, salt, key] = parts.as_slice() else {
            return Err(CryptoError::MalformedRecord(format!(
                "expected 3 colon-separated fields, got {}",
                parts.len()
            )));
        };

        let iterations = parse_iterations(iterations)?;
        let salt = decode_field(salt, "salt")?;
        let derived_key = decode_field(key, "derived key")?;
        Self::new(iterations, salt, derived_key)
    }
}

impl fmt::Display for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.iterations,
            data_encoding::BASE64.encode(&self.salt),
            data_encoding::BASE64.encode(&self.derived_key),
        )
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRecord")
            .field("iterations", &self.iterations)
            .field("salt_len", &self.salt.len())
            .field("derived_key", &"***")
            .finish()
    }
}
