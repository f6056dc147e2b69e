//! Criterion benchmarks for the engine's per-input and per-frame work.
//!
//! The simulation model runs on every slider change and the particle step on
//! every frame of the sedimentation stage, so both must stay far below a
//! frame budget.
//!
//! Run with: cargo bench -p simulation --bench model_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bevy::math::Vec2;
use simulation::chart_data::ChartCache;
use simulation::config::SEDIMENTATION_STAGE;
use simulation::model::{coag_efficiency, compute_series};
use simulation::sedimentation::SedimentationSystem;
use simulation::sim_rng::SimRng;
use simulation::test_harness::TestEngine;

const BASIN: Vec2 = Vec2::new(280.0, 160.0);

fn bench_model(c: &mut Criterion) {
    c.bench_function("coag_efficiency + compute_series", |b| {
        b.iter(|| {
            let eff = coag_efficiency(black_box(30.0), black_box(40.0), black_box(10.0));
            compute_series(eff)
        })
    });

    let result = compute_series(1.0);
    c.bench_function("chart rebuild", |b| {
        let mut cache = ChartCache::default();
        b.iter(|| cache.rebuild(black_box(&result), 2))
    });
}

fn bench_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("sedimentation_step");
    for efficiency in [0.4, 0.85, 1.3] {
        group.bench_with_input(
            BenchmarkId::from_parameter(efficiency),
            &efficiency,
            |b, &eff| {
                let mut rng = SimRng::from_seed_u64(42);
                let mut system = SedimentationSystem::default();
                let handle = system.enter(eff, BASIN, &mut rng.0, 0.0);
                b.iter(|| system.step(handle, 1.0 / 60.0, 1.0, &mut rng.0))
            },
        );
    }
    group.finish();
}

fn bench_engine_frame(c: &mut Criterion) {
    let mut engine = TestEngine::new();
    engine.goto(SEDIMENTATION_STAGE);
    c.bench_function("engine frame (sedimentation stage)", |b| {
        b.iter(|| engine.update())
    });
}

criterion_group!(benches, bench_model, bench_particles, bench_engine_frame);
criterion_main!(benches);
