#![allow(dead_code)]
use pooled_pdf::prelude::*;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn init_logger() { let _ = pretty_env_logger::try_init(); }

pub fn row(
    label: &str,
    mean: f64,
    sem: f64,
    n: i64,
    std: f64,
) -> StudyMeasurement {
    StudyMeasurement::new(label, mean, sem, n, std)
}

/// Consistent rows (`std == sem * sqrt(n)`) well inside the default support.
pub fn random_rows(
    seed: u64,
    count: usize,
) -> Vec<StudyMeasurement> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let n: i64 = rng.gen_range(1..=16);
            let sem: f64 = rng.gen_range(0.5..3.0);
            let mean: f64 = rng.gen_range(-80.0..-40.0);
            row(
                &format!("study{}", i),
                mean,
                sem,
                n,
                sem * (n as f64).sqrt(),
            )
        })
        .collect()
}

/// Inserts a row without measurement before every `every`-th row.
pub fn with_skipped_rows(
    rows: &[StudyMeasurement],
    every: usize,
) -> Vec<StudyMeasurement> {
    let mut out = Vec::new();
    for (i, r) in rows.iter().enumerate() {
        if i % every == 0 {
            out.push(row("skipped", -10.0, 1.0, 0, 0.0));
        }
        out.push(r.clone());
    }
    out
}
