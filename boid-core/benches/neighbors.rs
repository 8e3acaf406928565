use boid_core::{Simulation, SimulationConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_boids in [100, 500, 2000] {
        let config = SimulationConfig {
            width: 4000.0,
            height: 3000.0,
            num_boids,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("brute-force", num_boids), &config, |b, config| {
            let mut sim = Simulation::new(*config, 1).expect("valid config");
            b.iter(|| sim.step());
        });

        group.bench_with_input(BenchmarkId::new("spatial-grid", num_boids), &config, |b, config| {
            let mut sim = Simulation::with_spatial_grid(*config, 1).expect("valid config");
            b.iter(|| sim.step());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
