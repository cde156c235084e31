//! Hash and verify through the public API, as an authentication flow would.

use keyward_crypto_core::{CryptoError, Pbkdf2Params, PasswordHasher, Prf, LEGACY_ITERATIONS};

fn hasher() -> PasswordHasher {
    PasswordHasher::new(Pbkdf2Params {
        prf: Prf::HmacSha256,
        iterations: LEGACY_ITERATIONS,
    })
    .expect("legacy floor is a valid cost")
}

/// Matches `^\d+:[A-Za-z0-9+/]+=*:[A-Za-z0-9+/]+=*$` without a regex dependency.
fn matches_record_pattern(s: &str) -> bool {
    fn is_b64_field(f: &str) -> bool {
        let body = f.trim_end_matches('=');
        !body.is_empty()
            && body
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
    }
    let fields: Vec<&str> = s.split(':').collect();
    fields.len() == 3
        && !fields[0].is_empty()
        && fields[0].bytes().all(|b| b.is_ascii_digit())
        && is_b64_field(fields[1])
        && is_b64_field(fields[2])
}

#[test]
fn troubadour_scenario() {
    let hasher = hasher();
    let encoded = hasher.hash_encoded("Tr0ub4dor&3").unwrap();

    assert!(matches_record_pattern(&encoded), "unexpected format: {encoded}");
    assert!(hasher.verify("Tr0ub4dor&3", &encoded).unwrap());
    assert!(!hasher.verify("wrongpass", &encoded).unwrap());
}

#[test]
fn salts_never_repeat_over_many_hashes() {
    let hasher = hasher();
    let mut salts = std::collections::HashSet::new();
    for _ in 0..200 {
        let record = hasher.hash("same password").unwrap();
        assert!(salts.insert(record.salt().to_vec()), "salt collision");
    }
}

#[test]
fn malformed_records_are_distinguishable() {
    let hasher = hasher();
    for stored in [
        "not-a-valid-record",
        "1000:AAAA",
        "x:AAAA:AAAA",
        "1000:%%%%:AAAA",
        "1000:AAAA:AAAA:AAAA",
    ] {
        match hasher.verify("anything", stored) {
            Err(CryptoError::MalformedRecord(_)) => {}
            other => panic!("{stored:?} produced {other:?}"),
        }
    }
}

#[test]
fn unicode_passwords_roundtrip() {
    let hasher = hasher();
    for password in ["pässwörd", "密码", "🔑🔑", "tab\there"] {
        let encoded = hasher.hash_encoded(password).unwrap();
        assert!(hasher.verify(password, &encoded).unwrap());
    }
    // NFC vs NFD forms are different byte strings.
    let encoded = hasher.hash_encoded("caf\u{e9}").unwrap();
    assert!(!hasher.verify("cafe\u{301}", &encoded).unwrap());
}

#[test]
fn record_from_sha512_hasher_verifies_only_under_sha512() {
    let sha512 = PasswordHasher::new(Pbkdf2Params {
        prf: Prf::HmacSha512,
        iterations: LEGACY_ITERATIONS,
    })
    .unwrap();
    let encoded = sha512.hash_encoded("pw").unwrap();
    assert!(sha512.verify("pw", &encoded).unwrap());
    assert!(!hasher().verify("pw", &encoded).unwrap());
}
