//! Benchmarks for tablemark rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic tables, workbooks and text dumps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tablemark::{
    render_table, render_text, render_workbook, ColumnAlignment, ColumnSelector,
    ConversionOptions, Sheet, Table,
};

/// Creates a synthetic table with a header row and `rows` data rows.
fn create_test_table(rows: usize, columns: usize) -> Table {
    let header: Vec<String> = (0..columns).map(|c| format!("Column {}", c)).collect();
    let body = (0..rows).map(|r| {
        (0..columns)
            .map(|c| match c % 3 {
                0 => format!("row {} | cell {}", r, c),
                1 => format!("{}", r * c),
                _ => format!("line\nbreak {}", r),
            })
            .collect::<Vec<String>>()
    });
    Table::from_rows(std::iter::once(header).chain(body))
}

/// Creates synthetic extracted text with short lead-in lines.
fn create_test_pages(pages: usize) -> Vec<String> {
    (0..pages)
        .map(|p| {
            let mut page = String::new();
            for s in 0..20 {
                page.push_str(&format!("Section {}.{}\n", p, s));
                page.push_str("This paragraph carries   ordinary body text for the benchmark.\r\n");
                page.push_str("SUMMARY OF FINDINGS\n\n\n\n");
            }
            page
        })
        .collect()
}

/// Benchmark table rendering at various sizes.
fn bench_table_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_rendering");
    let options = ConversionOptions::new()
        .with_alignment(1, ColumnAlignment::Right)
        .with_alignment(2, ColumnAlignment::Center);

    for row_count in [100, 1_000, 10_000].iter() {
        let table = create_test_table(*row_count, 8);

        group.bench_function(format!("{}_rows", row_count), |b| {
            b.iter(|| render_table(black_box(&table), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark column selection by header name.
fn bench_column_selection(c: &mut Criterion) {
    let table = create_test_table(1_000, 16);
    let options = ConversionOptions::new().with_columns(vec![
        ColumnSelector::from("Column 12"),
        ColumnSelector::from(3),
        ColumnSelector::from("Column 0"),
    ]);

    c.bench_function("column_selection", |b| {
        b.iter(|| render_table(black_box(&table), &options).unwrap());
    });
}

/// Benchmark sequential and parallel workbook rendering.
fn bench_workbook_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("workbook_rendering");
    let options = ConversionOptions::default();

    for sheet_count in [2, 8].iter() {
        let sheets: Vec<Sheet> = (0..*sheet_count)
            .map(|i| Sheet::new(format!("Sheet{}", i), create_test_table(2_000, 8)))
            .collect();

        group.bench_function(format!("{}_sheets", sheet_count), |b| {
            b.iter(|| render_workbook(black_box(&sheets), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark heading detection tiers.
fn bench_text_rendering(c: &mut Criterion) {
    let pages = create_test_pages(50);
    let basic = ConversionOptions::default();
    let advanced = ConversionOptions::new().with_preserve_formatting(true);

    c.bench_function("text_basic_tier", |b| {
        b.iter(|| render_text(black_box(&pages), &basic).unwrap());
    });

    c.bench_function("text_advanced_tier", |b| {
        b.iter(|| render_text(black_box(&pages), &advanced).unwrap());
    });
}

criterion_group!(
    benches,
    bench_table_rendering,
    bench_column_selection,
    bench_workbook_rendering,
    bench_text_rendering,
);
criterion_main!(benches);
