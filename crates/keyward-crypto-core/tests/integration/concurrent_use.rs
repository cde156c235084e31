//! A single hasher shared across threads without locking.

use std::sync::Arc;
use std::thread;

use keyward_crypto_core::PasswordHasher;

#[test]
fn shared_hasher_is_usable_from_many_threads() {
    let hasher = Arc::new(PasswordHasher::legacy());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let hasher = Arc::clone(&hasher);
            thread::spawn(move || {
                let password = format!("password-{i}");
                let encoded = hasher.hash_encoded(&password).unwrap();
                (password, encoded)
            })
        })
        .collect();

    let results: Vec<(String, String)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (i, (password, encoded)) in results.iter().enumerate() {
        assert!(hasher.verify(password, encoded).unwrap());
        let (other, _) = &results[(i + 1) % results.len()];
        assert!(!hasher.verify(other, encoded).unwrap());
    }
}
