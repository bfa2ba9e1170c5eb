//! Benchmarks for the Invertible Bloom Filter
//!
//! Measures `encode`, `subtract`, and `decode` across a few `(d, k)`
//! configurations and difference sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ibf_oxide::ibf::InvertibleBloomFilter;

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibf_encode");

    for &size in &[10u64, 100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut ibf = InvertibleBloomFilter::new(size, 4, None, None).unwrap();
                ibf.encode(black_box(0..size)).unwrap();
                black_box(ibf);
            });
        });
    }

    group.finish();
}

fn bench_subtract(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibf_subtract");

    for &size in &[10u64, 100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut a = InvertibleBloomFilter::new(size, 4, None, None).unwrap();
            let mut b_ibf = InvertibleBloomFilter::new(size, 4, None, None).unwrap();
            a.encode(0..size).unwrap();
            b_ibf.encode(1..(size + 1)).unwrap();

            b.iter(|| {
                let mut diff = InvertibleBloomFilter::new(size, 4, None, None).unwrap();
                a.subtract(black_box(&b_ibf), &mut diff).unwrap();
                black_box(diff);
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibf_decode");

    for &diff_size in &[10u64, 50, 100] {
        group.throughput(Throughput::Elements(diff_size));
        group.bench_with_input(
            BenchmarkId::from_parameter(diff_size),
            &diff_size,
            |b, &diff_size| {
                let mut alice = InvertibleBloomFilter::new(diff_size * 2, 4, None, None).unwrap();
                let mut bob = InvertibleBloomFilter::new(diff_size * 2, 4, None, None).unwrap();

                alice.encode(0..diff_size).unwrap();
                bob.encode(diff_size..(diff_size * 2)).unwrap();

                b.iter_batched(
                    || {
                        let mut diff =
                            InvertibleBloomFilter::new(diff_size * 2, 4, None, None).unwrap();
                        alice.subtract(&bob, &mut diff).unwrap();
                        diff
                    },
                    |mut diff| {
                        black_box(diff.decode());
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_reconciliation_workflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("ibf_reconciliation");

    group.bench_function("complete_workflow_100", |b| {
        b.iter(|| {
            let mut alice = InvertibleBloomFilter::new(20, 4, None, None).unwrap();
            let mut bob = InvertibleBloomFilter::new(20, 4, None, None).unwrap();

            alice.encode(0..90).unwrap();
            bob.encode(10..100).unwrap();

            let mut diff = InvertibleBloomFilter::new(20, 4, None, None).unwrap();
            alice.subtract(&bob, &mut diff).unwrap();
            black_box(diff.decode());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_subtract,
    bench_decode,
    bench_reconciliation_workflow,
);
criterion_main!(benches);
