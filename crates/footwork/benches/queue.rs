mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use footwork::prelude::PriorityMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_priorities(count: usize, seed: u64) -> Vec<(usize, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|k| (k, rng.random_range(-1000..1000)))
        .collect()
}

fn queue_fill_and_drain_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue/fill_and_drain");

    for &n in &[64usize, 1024, 16384] {
        let items = make_priorities(n, 0xC0FFEE);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut queue: PriorityMap<usize, i64> = items.iter().copied().collect();
                while let Ok(entry) = queue.pop_min() {
                    black_box(entry);
                }
            });
        });
    }

    group.finish();
}

fn queue_update_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue/update");

    for &n in &[1024usize, 16384] {
        let items = make_priorities(n, 0xFACEFEED);
        let updates = make_priorities(n, 0xBADC0DE);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter_batched(
                || items.iter().copied().collect::<PriorityMap<usize, i64>>(),
                |mut queue| {
                    for &(k, p) in &updates {
                        queue.set(k, p);
                    }
                    black_box(queue.peek_min().map(|(k, _)| *k).ok());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = queue_fill_and_drain_benches,
              queue_update_benches
}
criterion_main!(benches);
