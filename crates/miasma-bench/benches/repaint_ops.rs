//! Criterion benchmarks for whole-registry repaint.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use miasma_bench::{jitter_agents, reference_config, scatter_agents, stress_config};
use miasma_engine::{MapRegistry, RegistryConfig, UpdateMode};
use miasma_space::ValidityMask;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn build(config: RegistryConfig) -> MapRegistry {
    let mask = ValidityMask::all_valid(&config.geometry().unwrap());
    MapRegistry::new(config, mask).unwrap()
}

/// Benchmark: inline repaint of 200 jittering agents on the reference map.
fn bench_repaint_inline_200(c: &mut Criterion) {
    let mut registry = build(reference_config(UpdateMode::Inline));
    let agents = scatter_agents(&mut registry, 200, 42);
    registry.apply_pending_registrations();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("repaint_inline_200", |b| {
        b.iter(|| {
            jitter_agents(&agents, 1.5, &mut rng);
            registry.repaint();
            black_box(registry.last_repaint());
        });
    });
}

/// Benchmark: background repaint round trip (spawn, paint, collect).
fn bench_repaint_background_200(c: &mut Criterion) {
    let mut registry = build(reference_config(UpdateMode::Background));
    let agents = scatter_agents(&mut registry, 200, 42);
    registry.apply_pending_registrations();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    c.bench_function("repaint_background_200", |b| {
        b.iter(|| {
            jitter_agents(&agents, 1.5, &mut rng);
            registry.repaint();
            black_box(registry.wait_for_repaint());
        });
    });
}

/// Benchmark: one full tick (registrations + repaint) on the stress map.
fn bench_tick_stress_1000(c: &mut Criterion) {
    let mut registry = build(stress_config(UpdateMode::Inline));
    let agents = scatter_agents(&mut registry, 1000, 42);
    registry.update(Duration::ZERO);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let tick = registry.config().repaint_interval + Duration::from_millis(1);

    let mut group = c.benchmark_group("stress");
    group.sample_size(20);
    group.bench_function("tick_stress_1000", |b| {
        b.iter(|| {
            jitter_agents(&agents, 1.0, &mut rng);
            black_box(registry.update(tick));
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_repaint_inline_200,
    bench_repaint_background_200,
    bench_tick_stress_1000
);
criterion_main!(benches);
