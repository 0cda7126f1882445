//! Criterion benchmarks for structured_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io;
use structured_logger::prelude::*;
use structured_logger::ContextKey;

const BACKENDS: [LoggerType; 2] = [LoggerType::Logrus, LoggerType::ZeroLog];

fn sink_logger(kind: LoggerType, format: LogFormat) -> SharedLogger {
    new_logger(
        kind,
        [
            with_level(LogLevel::Debug),
            with_output(io::sink()),
            with_format(format),
        ],
    )
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    for kind in BACKENDS {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| black_box(new_logger(kind, [with_output(io::sink())])));
        });
    }

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    for kind in BACKENDS {
        for format in [LogFormat::Json, LogFormat::Text] {
            let logger = sink_logger(kind, format);
            logger.register_common_field("rid", "1234".into());
            let id = format!("{}/{:?}", kind, format);

            group.bench_function(BenchmarkId::new("message", &id), |b| {
                b.iter(|| logger.info(&[with_message(black_box("request served"))]));
            });
        }
    }

    let logger = sink_logger(LoggerType::ZeroLog, LogFormat::Json);
    group.bench_function("suppressed", |b| {
        let quiet = new_logger(LoggerType::ZeroLog, [with_output(io::sink())]);
        b.iter(|| quiet.debug(&[with_message(black_box("filtered"))]));
    });

    let mut fields = Fields::new();
    fields.insert("status_code".into(), 200.into());
    fields.insert("elapsed".into(), 1000.into());
    fields.insert("uri".into(), "/v1/orders".into());
    group.bench_function("with_fields", |b| {
        b.iter(|| logger.info(&[with_message("done"), with_fields(black_box(&fields))]));
    });

    group.finish();
}

// ============================================================================
// Common Field Benchmarks
// ============================================================================

fn bench_common_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_fields");

    for count in [1usize, 10, 100] {
        let logger = sink_logger(LoggerType::Logrus, LogFormat::Json);
        for i in 0..count {
            logger.register_common_field(&format!("key_{}", i), (i as u64).into());
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("emit", count), &count, |b, _| {
            b.iter(|| logger.info(&[]));
        });
    }

    let logger = sink_logger(LoggerType::Logrus, LogFormat::Json);
    group.bench_function("register_overwrite", |b| {
        b.iter(|| logger.register_common_field("rid", black_box("1234").into()));
    });

    group.finish();
}

// ============================================================================
// Context Benchmarks
// ============================================================================

fn bench_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("context");

    let logger = sink_logger(LoggerType::ZeroLog, LogFormat::Json);
    group.bench_function("bind", |b| {
        let root = Context::background();
        b.iter(|| black_box(logger.with_context(&root)));
    });

    for depth in [1usize, 8, 32] {
        let mut ctx = logger.with_context(&Context::background());
        for i in 0..depth {
            ctx = ctx.with_value(ContextKey::new(format!("k{}", i)), i);
        }

        group.bench_with_input(BenchmarkId::new("lookup", depth), &ctx, |b, ctx| {
            b.iter(|| black_box(from_context(ctx, LoggerType::ZeroLog)));
        });
    }

    group.bench_function("fallback", |b| {
        let empty = Context::background();
        b.iter(|| black_box(from_context(&empty, LoggerType::ZeroLog)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_emission,
    bench_common_fields,
    bench_context
);
criterion_main!(benches);
