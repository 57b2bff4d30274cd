use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};
use pooled_pdf::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn generate_rows(count: usize) -> Vec<StudyMeasurement> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let n: i64 = rng.gen_range(1..=40);
            let sem: f64 = rng.gen_range(0.5..3.0);
            StudyMeasurement::new(
                format!("study{}", i),
                rng.gen_range(-100.0..-20.0),
                sem,
                n,
                sem * (n as f64).sqrt(),
            )
        })
        .collect()
}

pub fn benchmark_aggregate(c: &mut Criterion) {
    // Typical subgroup sizes of a midpoint table
    let sizes = [10, 50, 200];
    let aggregator = PdfAggregator::default();

    let mut group = c.benchmark_group("aggregate");
    for size in sizes.iter() {
        let rows = generate_rows(*size);
        group.bench_function(format!("rows_{}", size), |b| {
            b.iter(|| aggregator.aggregate(black_box(rows.clone()), false))
        });
        group.bench_function(format!("rows_{}_individual", size), |b| {
            b.iter(|| aggregator.aggregate(black_box(rows.clone()), true))
        });
    }
    group.finish();
}

pub fn benchmark_chi_squared(c: &mut Criterion) {
    let x = PdfConfig::default().computation_grid();
    let observed = gaussian(x.view(), -50.0, 6.0).unwrap();
    let expected = gaussian(x.view(), -49.0, 6.5).unwrap();
    c.bench_function("chi_squared_100k", |b| {
        b.iter(|| chi_squared(black_box(observed.view()), black_box(expected.view()), 2))
    });
}

criterion_group!(benches, benchmark_aggregate, benchmark_chi_squared);
criterion_main!(benches);
