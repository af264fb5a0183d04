use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixie::{read_str, row, write_str, OutputStyle, Row};

fn element_row(i: usize) -> Row {
    row!({
        "name": format!("element-{}", i),
        "symbol": format!("E{}", i % 100),
        "number": i as i64,
        "weight": i as f64 + 0.5,
        "metallic": i % 2 == 0
    })
}

fn rows(count: usize) -> Vec<Row> {
    (0..count).map(element_row).collect()
}

fn benchmark_write_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_compact");
    for size in [10, 100, 1000].iter() {
        let rows = rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| write_str(black_box(rows), OutputStyle::Compact))
        });
    }
    group.finish();
}

fn benchmark_write_aligned(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_aligned_compact");
    for size in [10, 100, 1000].iter() {
        let rows = rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| write_str(black_box(rows), OutputStyle::AlignedCompact))
        });
    }
    group.finish();
}

fn benchmark_read_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_compact");
    for size in [10, 100, 1000].iter() {
        let text = write_str(&rows(*size), OutputStyle::Compact).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| read_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_read_expanded(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_expanded");
    for size in [10, 100, 1000].iter() {
        let text = write_str(&rows(*size), OutputStyle::Expanded).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| read_str(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_write_compact,
    benchmark_write_aligned,
    benchmark_read_compact,
    benchmark_read_expanded
);
criterion_main!(benches);
