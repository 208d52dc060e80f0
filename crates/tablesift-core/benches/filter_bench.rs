use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tablesift_core::query::{evaluate, parse_query};
use tablesift_core::Row;

fn create_rows(size: usize) -> Vec<Row> {
    let cities = ["Beijing", "Shanghai", "Shenzhen", "Hangzhou", "Chengdu"];
    (0..size)
        .map(|i| -> Row {
            [
                ("city", cities[i % cities.len()].to_string()),
                ("pop", (i % 40).to_string()),
                ("note", if i % 3 == 0 { String::new() } else { format!("row {}", i) }),
            ]
            .into_iter()
            .collect()
        })
        .collect()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for query in [
        "pop > 10",
        "city == 'Beijing' and pop > 10",
        "(city == 'Beijing' or city == 'Shanghai') and note.isNotEmpty() and pop >= 5",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| black_box(parse_query(query)));
        });
    }

    group.finish();
}

fn benchmark_filter_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_pass");
    let query = "city == 'Beijing' and pop > 10 or note.contains('9')";

    for size in [1_000, 10_000, 100_000] {
        let rows = create_rows(size);
        group.bench_with_input(BenchmarkId::new("parse_and_filter", size), &rows, |b, rows| {
            b.iter(|| {
                let condition = parse_query(query);
                let matched = rows
                    .iter()
                    .filter(|row| evaluate(row, condition.as_ref()))
                    .count();
                black_box(matched)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_filter_pass);
criterion_main!(benches);
