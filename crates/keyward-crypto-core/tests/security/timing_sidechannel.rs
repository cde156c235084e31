//! Timing side-channel validation for [`constant_time_eq`].
//!
//! Compares timing distributions for an early difference (first byte) and a
//! late difference (last byte) in equal-length inputs. A short-circuiting
//! comparator shows a large gap between the two classes; ours should not.
//! The t-statistic must stay below 4.5 (no difference at >99.999%).
//!
//! **Caveat:** statistical test. Scheduler noise can cause rare false
//! positives, so samples are interleaved and batched.

use std::time::Instant;

use keyward_crypto_core::constant_time_eq;

const SAMPLES: usize = 10_000;

/// Comparisons per sample, to lift the measurement above timer resolution.
const BATCH: usize = 64;

const T_THRESHOLD: f64 = 4.5;

#[inline(never)]
fn timed_batch(a: &[u8], b: &[u8]) -> f64 {
    let start = Instant::now();
    for _ in 0..BATCH {
        std::hint::black_box(constant_time_eq(std::hint::black_box(a), std::hint::black_box(b)));
    }
    start.elapsed().as_secs_f64()
}

#[allow(clippy::cast_precision_loss)]
fn welch_t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a: f64 = a.iter().sum::<f64>() / n_a;
    let mean_b: f64 = b.iter().sum::<f64>() / n_b;
    let var_a: f64 = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b: f64 = b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);
    let denominator = (var_a / n_a + var_b / n_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    (mean_a - mean_b) / denominator
}

/// Drop the slowest 5% of each class (preemption outliers).
fn trim(mut samples: Vec<f64>) -> Vec<f64> {
    samples.sort_by(f64::total_cmp);
    let keep = samples.len() * 95 / 100;
    samples.truncate(keep);
    samples
}

#[test]
#[ignore = "statistical timing test; run with --ignored on a quiet machine"]
fn early_and_late_differences_take_same_time() {
    let reference = vec![0xA5u8; 4096];
    let mut early = reference.clone();
    early[0] ^= 0xFF;
    let mut late = reference.clone();
    late[4095] ^= 0xFF;

    let mut class_early = Vec::with_capacity(SAMPLES);
    let mut class_late = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        class_early.push(timed_batch(&reference, &early));
        class_late.push(timed_batch(&reference, &late));
    }

    let t = welch_t_statistic(&trim(class_early), &trim(class_late));
    assert!(
        t.abs() < T_THRESHOLD,
        "timing leak detected: |t| = {:.2} >= {T_THRESHOLD}",
        t.abs()
    );
}

#[test]
fn welch_t_of_identical_samples_is_zero() {
    let a = vec![1.0; 100];
    assert!(welch_t_statistic(&a, &a).abs() < f64::EPSILON);
}

#[test]
fn welch_t_detects_shifted_distribution() {
    let a: Vec<f64> = (0..1000).map(|i| f64::from(i % 10)).collect();
    let b: Vec<f64> = a.iter().map(|x| x + 5.0).collect();
    assert!(welch_t_statistic(&a, &b).abs() > T_THRESHOLD);
}
