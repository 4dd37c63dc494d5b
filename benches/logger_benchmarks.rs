//! Criterion benchmarks for leveled_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use leveled_logger::prelude::*;
use leveled_logger::{info, LineFormatter};
use std::io;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn quiet_console() -> ConsoleAppender {
    ConsoleAppender::with_writer(io::sink()).colors(false)
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder("Bench")
        .level(LogLevel::Error)
        .file_enabled(false)
        .console(quiet_console())
        .build();

    group.bench_function("filtered_log_from", |b| {
        b.iter(|| {
            logger.log_from("bench", LogLevel::Debug, black_box("Filtered message"));
        });
    });

    group.bench_function("filtered_macro", |b| {
        b.iter(|| {
            leveled_logger::debug!(logger, "Filtered {}", black_box(42));
        });
    });

    group.bench_function("permits", |b| {
        b.iter(|| black_box(LogLevel::Warning).permits(black_box(LogLevel::Info)));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let formatter = LineFormatter::new();
    let clock = SystemClock;

    group.bench_function("format_line", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                clock.now(),
                LogLevel::Info,
                "Bench",
                "format_line",
                black_box("Benchmark message"),
            );
            black_box(formatter.format(&record))
        });
    });

    group.bench_function("sanitize_multiline", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                clock.now(),
                LogLevel::Error,
                "Bench",
                "sanitize",
                black_box("line one\nline two\r\tline three"),
            );
            black_box(record)
        });
    });

    group.finish();
}

// ============================================================================
// Console Logging Benchmarks
// ============================================================================

fn bench_console_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder("Bench")
        .file_enabled(false)
        .console(quiet_console())
        .build();

    group.bench_function("log_from", |b| {
        b.iter(|| {
            logger.log_from("bench", LogLevel::Info, black_box("Console message"));
        });
    });

    group.bench_function("macro", |b| {
        b.iter(|| {
            info!(logger, "Console message {}", black_box(7));
        });
    });

    group.finish();
}

// ============================================================================
// File Logging Benchmarks
// ============================================================================

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::builder("Bench")
        .log_dir(temp_dir.path())
        .console_enabled(false)
        .max_file_size(64 * 1024 * 1024)
        .build();

    group.bench_function("append", |b| {
        b.iter(|| {
            logger.log_from("bench", LogLevel::Info, black_box("File message"));
        });
    });

    let rotating_dir = TempDir::new().expect("Failed to create temp dir");
    let rotating = Logger::builder("Bench")
        .log_dir(rotating_dir.path())
        .console_enabled(false)
        .max_file_size(16 * 1024)
        .build();

    group.bench_function("append_with_rotation", |b| {
        b.iter(|| {
            rotating.log_from("bench", LogLevel::Info, black_box("Rotating message"));
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::builder("Bench")
            .log_dir(temp_dir.path())
            .console_enabled(false)
            .max_file_size(64 * 1024 * 1024)
            .build(),
    );

    for thread_count in [2, 4, 8] {
        group.throughput(Throughput::Elements(thread_count * 100));
        group.bench_function(format!("{}_threads", thread_count), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..thread_count)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                logger.log_from("worker", LogLevel::Info, format!("t{} m{}", t, i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_level_filtering,
    bench_formatting,
    bench_console_logging,
    bench_file_logging,
    bench_concurrent_logging,
);

criterion_main!(benches);
