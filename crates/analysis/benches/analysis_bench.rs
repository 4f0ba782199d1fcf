use criterion::{black_box, criterion_group, criterion_main, Criterion};
use purgesim_analysis::analysis::{
    individual_load_f2, population_catalog, population_summary, windowed_pi,
};
use purgesim_sim::simulation::{Simulation, SimulationBuilder};

fn simulation() -> Simulation {
    let mut sim = SimulationBuilder::new()
        .capacity(500)
        .seed(42)
        .genome(1000, 100, 10)
        .deleterious_types(100)
        .mutation_rate(1e-5)
        .build()
        .unwrap();
    sim.run_for(100).unwrap();
    sim
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let sim = simulation();
    let population = sim.population();
    let counts = population.mutation_counts();

    group.bench_function("mutation_counts", |b| {
        b.iter(|| black_box(population.mutation_counts()))
    });
    group.bench_function("population_summary", |b| {
        b.iter(|| black_box(population_summary(population, black_box(&counts))))
    });
    group.bench_function("individual_load_f2", |b| {
        b.iter(|| {
            for ind in population.individuals().iter().take(20) {
                black_box(individual_load_f2(ind));
            }
        })
    });

    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let sim = simulation();
    let population = sim.population();
    let counts = population.mutation_counts();

    group.bench_function("without_genotypes", |b| {
        b.iter(|| black_box(population_catalog(population, &counts, false)))
    });
    group.bench_function("with_genotypes", |b| {
        b.iter(|| black_box(population_catalog(population, &counts, true)))
    });

    group.finish();
}

fn bench_diversity(c: &mut Criterion) {
    let mut group = c.benchmark_group("diversity");
    let sim = simulation();
    let population = sim.population();
    let genome_length = sim.architecture().map().len();
    let sample: Vec<usize> = (0..20).collect();

    group.bench_function("windowed_pi", |b| {
        b.iter(|| black_box(windowed_pi(population, &sample, genome_length, 10_000)))
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_catalog, bench_diversity);
criterion_main!(benches);
