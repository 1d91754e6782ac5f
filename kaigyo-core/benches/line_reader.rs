//! Benchmarks for line reading throughput

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use kaigyo_core::{LineDelimiter, LineReader, TextSource};
use std::hint::black_box;

/// Generate test text of the given size with the given line terminator.
fn generate_test_text(size_kb: usize, terminator: &str) -> String {
    let base_line = "The quick brown fox jumps over the lazy dog";
    let line_len = base_line.len() + terminator.len();
    let target_size = size_kb * 1024;
    let repetitions = target_size / line_len;

    let mut text = String::with_capacity(repetitions * line_len);
    for _ in 0..repetitions {
        text.push_str(base_line);
        text.push_str(terminator);
    }
    text
}

fn drain_lines<S: kaigyo_core::CharSource>(reader: &mut LineReader<S>) -> usize {
    let mut count = 0;
    while let Ok(Some(line)) = reader.read_line() {
        black_box(&line);
        count += 1;
    }
    count
}

fn benchmark_generic(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_generic");

    for (terminator, label) in [("\n", "lf"), ("\r\n", "crlf"), ("\r", "cr")] {
        let text = generate_test_text(256, terminator);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut reader = LineReader::new(TextSource::from(text.as_str()), None);
                drain_lines(black_box(&mut reader))
            });
        });
    }

    group.finish();
}

fn benchmark_explicit(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_explicit");

    let cases = [
        (LineDelimiter::Lf, "\n", "lf"),
        (LineDelimiter::Crlf, "\r\n", "crlf"),
        (LineDelimiter::Cr, "\r", "cr"),
    ];

    for (delimiter, terminator, label) in cases {
        let text = generate_test_text(256, terminator);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut reader =
                    LineReader::new(TextSource::from(text.as_str()), Some(delimiter));
                drain_lines(black_box(&mut reader))
            });
        });
    }

    group.finish();
}

fn benchmark_buffer_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_capacity");

    let text = generate_test_text(256, "\n");
    let capacities = [(64, "64"), (256, "256"), (1024, "1024"), (4096, "4096")];

    for (capacity, label) in capacities {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut reader = LineReader::with_capacity(
                    TextSource::from(text.as_str()),
                    Some(LineDelimiter::Lf),
                    capacity,
                );
                drain_lines(black_box(&mut reader))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generic,
    benchmark_explicit,
    benchmark_buffer_capacity
);
criterion_main!(benches);
