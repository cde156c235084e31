mod calibration;
mod concurrent_use;
mod hash_verify_roundtrip;
mod legacy_records;
