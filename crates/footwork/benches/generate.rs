mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use footwork::prelude::{build_graph, generate_from_template, Foot, GenerateConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_graph_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/build_graph");
    let options = GenerateConfig::default().build_options();

    for &measures in &[4usize, 32, 128] {
        let template = common::stream_template(measures);
        group.throughput(common::elements_throughput(template.note_positions().len()));

        group.bench_with_input(BenchmarkId::from_parameter(measures), &measures, |b, _| {
            b.iter(|| black_box(build_graph(&template, &options, Foot::Left)));
        });
    }

    group.finish();
}

fn generate_stream_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/stream");
    let config = GenerateConfig::default();

    for &measures in &[4usize, 32, 128] {
        let template = common::stream_template(measures);
        group.throughput(common::elements_throughput(template.note_positions().len()));

        group.bench_with_input(BenchmarkId::from_parameter(measures), &measures, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
            b.iter(|| black_box(generate_from_template(&template, &config, &mut rng)));
        });
    }

    group.finish();
}

fn generate_doubles_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/doubles_random");
    let config = GenerateConfig::default().with_max_search_steps(50_000);

    for &density in &[0.25f32, 0.5, 0.75] {
        let template = common::random_doubles_template(16, density, 0x0BADF00D);
        group.throughput(common::elements_throughput(template.note_positions().len()));

        group.bench_with_input(
            BenchmarkId::new("density", format!("{density:.2}")),
            &density,
            |b, _| {
                let mut rng = StdRng::seed_from_u64(0xFEED);
                b.iter(|| black_box(generate_from_template(&template, &config, &mut rng)));
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = build_graph_benches,
              generate_stream_benches,
              generate_doubles_benches
}
criterion_main!(benches);
