//! `keyward-crypto-core` — Password hashing primitives for Keyward.
//!
//! Pure computation: no file access, no network, no global state beyond
//! the OS CSPRNG. Everything here is safe to call from many threads at once.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod compare;
pub mod kdf;

pub mod record;

pub mod hasher;

pub mod digest;

pub use compare::constant_time_eq;
pub use digest::{digest, ContentDigest, DIGEST_LEN};
pub use error::CryptoError;
pub use hasher::PasswordHasher;
pub use kdf::{
    calibrate, derive, Pbkdf2Params, Prf, DEFAULT_ITERATIONS, LEGACY_ITERATIONS,
    MAX_DERIVED_KEY_LEN, MAX_RECORD_ITERATIONS,
};
pub use memory::{disable_core_dumps, SecretBuffer, SecretBytes};
pub use record::{PasswordRecord, KEY_LEN, SALT_LEN};
