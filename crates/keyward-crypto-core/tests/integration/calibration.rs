//! Hardware calibration of the PBKDF2 cost parameter.

use std::time::Duration;

use keyward_crypto_core::{
    calibrate, PasswordHasher, Pbkdf2Params, Prf, LEGACY_ITERATIONS, MAX_RECORD_ITERATIONS,
};

#[test]
fn calibrate_returns_value_in_accepted_range() {
    let iterations = calibrate(Prf::HmacSha256, Duration::from_millis(20)).unwrap();
    assert!((LEGACY_ITERATIONS..=MAX_RECORD_ITERATIONS).contains(&iterations));
}

#[test]
fn calibrated_cost_builds_a_hasher() {
    let iterations = calibrate(Prf::HmacSha1, Duration::from_millis(5)).unwrap();
    let hasher = PasswordHasher::new(Pbkdf2Params {
        prf: Prf::HmacSha1,
        iterations,
    })
    .expect("calibrated cost should always be accepted");
    let encoded = hasher.hash_encoded("pw").unwrap();
    assert!(hasher.verify("pw", &encoded).unwrap());
}

#[test]
fn tiny_target_clamps_to_legacy_floor() {
    let short = calibrate(Prf::HmacSha512, Duration::from_micros(1)).unwrap();
    assert_eq!(short, LEGACY_ITERATIONS);
}
