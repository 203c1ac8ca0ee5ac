//! Criterion benchmarks for barklog
//!
//! Run with: cargo bench --bench record_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use barklog::{BinaryLogger, Complex, Discard, TextLogger};

fn bench_text_record(c: &mut Criterion) {
    let logger = TextLogger::new(Discard);

    c.bench_function("text_record_minimal", |b| {
        b.iter(|| logger.info().msg(black_box("benchmark")));
    });

    c.bench_function("text_record_typical", |b| {
        b.iter(|| {
            logger
                .info()
                .str("key", black_box("value"))
                .int("id", black_box(1234))
                .float64("ratio", black_box(2.75))
                .bool("enabled", black_box(true))
                .msg("benchmark");
        });
    });

    c.bench_function("text_record_escaping", |b| {
        b.iter(|| {
            logger
                .info()
                .str("path", black_box("C:\\temp\\\"quoted\"\n"))
                .bytes("blob", black_box(&[0xDE, 0xAD, 0xBE, 0xEF]))
                .complex128("z", black_box(Complex::new(1.5, -2.5)))
                .msg("escaped");
        });
    });
}

fn bench_binary_record(c: &mut Criterion) {
    let logger = BinaryLogger::new(Discard);

    c.bench_function("binary_record_minimal", |b| {
        b.iter(|| logger.info().msg(black_box("benchmark")));
    });

    c.bench_function("binary_record_typical", |b| {
        b.iter(|| {
            logger
                .info()
                .str("key", black_box("value"))
                .int("id", black_box(1234))
                .float64("ratio", black_box(2.75))
                .bool("enabled", black_box(true))
                .msg("benchmark");
        });
    });
}

fn bench_string_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_sizes");
    let text = TextLogger::new(Discard);
    let binary = BinaryLogger::new(Discard);

    for size in [16usize, 256, 4096] {
        let value = "x".repeat(size);

        group.bench_with_input(BenchmarkId::new("text", size), &value, |b, value| {
            b.iter(|| text.info().str("v", black_box(value)).msg("sized"));
        });

        group.bench_with_input(BenchmarkId::new("binary", size), &value, |b, value| {
            b.iter(|| binary.info().str("v", black_box(value)).msg("sized"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_record,
    bench_binary_record,
    bench_string_sizes
);
criterion_main!(benches);
