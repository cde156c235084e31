//! Records written by the original HMAC-SHA1 / 1000-iteration hasher.

use keyward_crypto_core::{PasswordHasher, PasswordRecord};

/// `Tr0ub4dor&3` with salt bytes 0x00..=0x17, PBKDF2-HMAC-SHA1, c=1000, dkLen=20.
const LEGACY_RECORD: &str = "1000:AAECAwQFBgcICQoLDA0ODxAREhMUFRYX:CpDNovXXkHEMbES/gsm+cmjyPNM=";

/// Same password and salt under PBKDF2-HMAC-SHA256.
const SHA256_RECORD: &str = "1000:AAECAwQFBgcICQoLDA0ODxAREhMUFRYX:OF0W3iTI22kTK2fqizLus+BhyvM=";

#[test]
fn legacy_record_verifies_under_legacy_hasher() {
    let hasher = PasswordHasher::legacy();
    assert!(hasher.verify("Tr0ub4dor&3", LEGACY_RECORD).unwrap());
    assert!(!hasher.verify("Tr0ub4dor&4", LEGACY_RECORD).unwrap());
}

#[test]
fn sha256_record_verifies_under_default_prf() {
    let hasher = PasswordHasher::default();
    assert!(hasher.verify("Tr0ub4dor&3", SHA256_RECORD).unwrap());
    assert!(!hasher.verify("Tr0ub4dor&3", LEGACY_RECORD).unwrap());
}

#[test]
fn legacy_record_flagged_for_rehash() {
    let record: PasswordRecord = LEGACY_RECORD.parse().unwrap();
    assert!(PasswordHasher::default().needs_rehash(&record));
    assert!(!PasswordHasher::legacy().needs_rehash(&record));
}

#[test]
fn legacy_record_roundtrips_byte_for_byte() {
    let record: PasswordRecord = LEGACY_RECORD.parse().unwrap();
    assert_eq!(record.encode(), LEGACY_RECORD);
}
