//! Criterion benchmarks for the simulation step path.
//!
//! Run with:
//! ```bash
//! cargo bench -p dialectica-engine
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dialectica_engine::{DialecticalSystem, SystemConfig};

fn bench_autonomous_step(c: &mut Criterion) {
    let mut system = DialecticalSystem::new(SystemConfig {
        name: "bench".into(),
        horizon: 100_000,
        seed: Some(1),
        ..SystemConfig::default()
    })
    .unwrap();

    c.bench_function("run/step_autonomous", |b| {
        b.iter(|| {
            if system.is_complete() {
                system.reset().unwrap();
            }
            system.step(None).unwrap()
        })
    });
}

fn bench_external_step(c: &mut Criterion) {
    let mut system = DialecticalSystem::new(SystemConfig {
        name: "bench".into(),
        horizon: 100_000,
        seed: Some(2),
        ..SystemConfig::default()
    })
    .unwrap();

    let mut i = 0u32;
    c.bench_function("run/step_external_input", |b| {
        b.iter(|| {
            if system.is_complete() {
                system.reset().unwrap();
            }
            i = i.wrapping_add(1);
            system.step(Some((f64::from(i) * 0.01).sin())).unwrap()
        })
    });
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run/full_horizon");
    for &horizon in &[100u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("steps", horizon), &horizon, |b, &horizon| {
            b.iter(|| {
                let mut system = DialecticalSystem::new(SystemConfig {
                    name: "bench".into(),
                    horizon,
                    seed: Some(3),
                    ..SystemConfig::default()
                })
                .unwrap();
                system.run_to_horizon().unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_autonomous_step, bench_external_step, bench_full_run);
criterion_main!(benches);
