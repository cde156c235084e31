//! `keyward-auth` — Credential policy on top of `keyward-crypto-core`.
//!
//! Adds to the raw hasher:
//! - a JSON hashing policy with defaults ([`policy`])
//! - enrollment and verification with transparent cost upgrades ([`authenticator`])
//! - `tracing` instrumentation that never records secrets

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod authenticator;
pub mod error;
pub mod policy;

pub use authenticator::{Authenticator, Verification};
pub use error::AuthError;
pub use policy::HashingPolicy;
