use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use odd_stream::demo::{build_pipeline, transform_eager};
use odd_stream::terminal::collect;
use tokio::runtime::Runtime;

fn bench_odd_triple_successor(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("odd_triple_successor");

    for size in [5i64, 1_000, 100_000].iter() {
        let source: Vec<i64> = (1..=*size).collect();

        group.bench_with_input(BenchmarkId::new("eager", size), &source, |b, source| {
            b.iter(|| black_box(transform_eager(black_box(source))));
        });

        group.bench_with_input(BenchmarkId::new("stream", size), &source, |b, source| {
            b.to_async(&rt).iter(|| async {
                let result = collect(build_pipeline(source.clone())).await;
                black_box(result)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_odd_triple_successor);
criterion_main!(benches);
