//! Parser performance benchmarks.
//!
//! Measures import throughput across file sizes and formats.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datascan::import;
use datascan::input::{detect_delimiter, split_quoted};

/// Generate synthetic delimited data with the specified number of rows and columns.
fn generate_delimited(rows: usize, cols: usize, delimiter: char) -> String {
    let mut data = String::new();

    for i in 0..cols {
        if i > 0 {
            data.push(delimiter);
        }
        data.push_str(&format!("column_{}", i + 1));
    }
    data.push('\n');

    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push(delimiter);
            }
            // Mix of cell types
            match col % 5 {
                0 => data.push_str(&format!("ID_{:06}", row)),
                1 => data.push_str(&format!("{:.2}", row as f64 * 1.5)),
                2 => data.push_str(&format!("2023-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1)),
                3 => data.push_str(if row % 2 == 0 { "true" } else { "false" }),
                4 => data.push_str(&format!("Category_{}", row % 10)),
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

/// Generate a JSON array of objects.
fn generate_json(rows: usize) -> String {
    let records: Vec<serde_json::Value> = (0..rows)
        .map(|row| {
            serde_json::json!({
                "id": row,
                "name": format!("Customer {}", row % 97),
                "amount": row as f64 * 2.25,
                "active": row % 3 == 0,
                "created_date": format!("2024-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1),
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

fn bench_import_formats(c: &mut Criterion) {
    for (format, delimiter) in [("csv", ','), ("tsv", '\t'), ("txt", '|')] {
        let mut group = c.benchmark_group(format!("import_{}", format));
        let file_name = format!("bench.{}", format);

        for rows in [100, 1_000, 10_000] {
            let data = generate_delimited(rows, 10, delimiter);
            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
                b.iter(|| import(black_box(data.as_bytes()), &file_name))
            });
        }

        group.finish();
    }
}

fn bench_import_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_json");

    for rows in [100, 1_000, 10_000] {
        let data = generate_json(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| import(black_box(data.as_bytes()), "bench.json"))
        });
    }

    group.finish();
}

fn bench_field_splitting(c: &mut Criterion) {
    let plain = "alpha,beta,gamma,delta,epsilon,zeta,eta,theta";
    let quoted = r#""alpha, inc",beta,"say ""hi""",delta,"e,p,s",zeta,eta,theta"#;

    c.bench_function("split_quoted_plain", |b| b.iter(|| split_quoted(black_box(plain), ',')));
    c.bench_function("split_quoted_escaped", |b| b.iter(|| split_quoted(black_box(quoted), ',')));
    c.bench_function("detect_delimiter", |b| b.iter(|| detect_delimiter(black_box("a;b;c;d"))));
}

criterion_group!(benches, bench_import_formats, bench_import_json, bench_field_splitting);
criterion_main!(benches);
