//! Criterion micro-benchmarks for line plotting.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use umbra_bench::line_pairs;
use umbra_core::Position;
use umbra_space::{plot_line, plot_line_into};

/// Benchmark: 1000 lines across an 80x50 map, fresh allocation each.
fn bench_plot_line_1k(c: &mut Criterion) {
    let pairs = line_pairs(80, 50, 1_000, 42);

    c.bench_function("plot_line_1k", |b| {
        b.iter(|| {
            for (from, to) in &pairs {
                black_box(plot_line(*from, *to));
            }
        });
    });
}

/// Benchmark: the same 1000 lines into one reused buffer.
fn bench_plot_line_into_1k(c: &mut Criterion) {
    let pairs = line_pairs(80, 50, 1_000, 42);
    let mut buf: Vec<Position> = Vec::with_capacity(128);

    c.bench_function("plot_line_into_1k", |b| {
        b.iter(|| {
            for (from, to) in &pairs {
                plot_line_into(*from, *to, &mut buf);
                black_box(&buf);
            }
        });
    });
}

criterion_group!(benches, bench_plot_line_1k, bench_plot_line_into_1k);
criterion_main!(benches);
