use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tcode_mutex::{BoundarySet, MutexMerge};
use tcode_test_utils::synthetic_column;

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutex/merge");
    for count in [1_000usize, 10_000, 50_000] {
        let a = synthetic_column("a", count, 40, 7);
        let b = synthetic_column("b", count, 55, 3);
        let merge = MutexMerge::new("ab");

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| {
                let outcome = merge
                    .merge_ref(black_box(&a), black_box(&b))
                    .expect("merge synthetic columns");
                black_box(outcome.report.cells_created);
            });
        });
    }
    group.finish();
}

fn bench_boundaries(c: &mut Criterion) {
    let a = synthetic_column("a", 50_000, 40, 7);
    let b = synthetic_column("b", 50_000, 55, 3);

    c.bench_function("mutex/boundaries", |bench| {
        bench.iter(|| {
            let set = BoundarySet::from_columns(black_box(&a), black_box(&b));
            black_box(set.len());
        });
    });
}

criterion_group!(benches, bench_merge, bench_boundaries);
criterion_main!(benches);
