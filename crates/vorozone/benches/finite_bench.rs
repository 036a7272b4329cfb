//! Criterion benchmarks for finite reconstruction.
//! Focus sizes: spokes in {8, 64, 512, 4096} (wheel diagrams).
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p vorozone

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use vorozone::api::{angular_order, reconstruct, wheel, ReconstructCfg};

fn bench_finite(c: &mut Criterion) {
    let mut group = c.benchmark_group("finite");
    for &n in &[8usize, 64, 512, 4096] {
        let vd = wheel(n, 1.0, Vector2::new(0.3, -0.2), 0.1);
        group.bench_with_input(BenchmarkId::new("reconstruct_wheel", n), &vd, |b, vd| {
            b.iter(|| {
                let _out = reconstruct(vd, ReconstructCfg::default()).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("angular_order", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    (0..n)
                        .map(|k| {
                            let th = (k * 7919 % n) as f64 / n as f64 * std::f64::consts::TAU;
                            Vector2::new(th.cos(), th.sin())
                        })
                        .collect::<Vec<_>>()
                },
                |pts| {
                    let _perm = angular_order(&pts);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_finite);
criterion_main!(benches);
