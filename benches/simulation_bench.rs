//! Benchmarks for lattice construction and the per-iteration update rule

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rumor_lattice::{Shape, Simulation, SimulationConfig};

fn bench_config(rows: usize, cols: usize) -> SimulationConfig {
    SimulationConfig {
        density: 0.85,
        cooldown_limit: 5,
        iterations: 100,
        susceptibility_weights: [0.7, 0.15, 0.1, 0.05],
        shape: Shape::new(rows, cols),
        seed: 12345,
    }
}

fn bench_build(c: &mut Criterion) {
    let config = bench_config(100, 100);
    c.bench_function("build_random_100x100", |b| {
        b.iter(|| Simulation::new(black_box(&config)).unwrap())
    });
}

fn bench_step(c: &mut Criterion) {
    let config = bench_config(100, 100);
    c.bench_function("step_100x100", |b| {
        let mut sim = Simulation::new(&config).unwrap();
        b.iter(|| sim.step())
    });
}

fn bench_full_run(c: &mut Criterion) {
    let config = bench_config(50, 50);
    c.bench_function("run_to_completion_50x50", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(black_box(&config)).unwrap();
            sim.run_to_completion();
            black_box(sim.percent_reached())
        })
    });
}

criterion_group!(benches, bench_build, bench_step, bench_full_run);
criterion_main!(benches);
