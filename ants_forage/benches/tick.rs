use ants_forage::{Simulation, SimulationConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const DT: f64 = 0.45;

fn reference(ant_count: usize) -> Simulation {
    let config = SimulationConfig {
        ant_count,
        seed: Some(42),
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(config, None).expect("reference config is valid");
    // Let the colony spread out from the nest first
    for _ in 0..200 {
        simulation.advance_tick(DT);
    }
    simulation
}

fn bench_advance_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_tick");

    for ant_count in [100, 400] {
        let mut simulation = reference(ant_count);
        group.bench_function(format!("ants{}", ant_count), |b| {
            b.iter(|| black_box(simulation.advance_tick(DT)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance_tick);
criterion_main!(benches);
