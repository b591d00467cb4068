//! Parse and rewrite benchmarks.
//!
//! The proxy parses and rewrites every statement on the request path, once per
//! target shard, so both steps are measured separately and together.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sqlshard::semantic::InsertSemantics;
use sqlshard::{RewriteOptions, Rewriter, SqlTree, extract};

const QUERIES: &[(&str, &str)] = &[
    ("point", "SELECT id, name FROM users WHERE id = 42"),
    (
        "aggregate",
        "SELECT AVG(age), COUNT(*) FROM users WHERE age BETWEEN 18 AND 65 AND name LIKE 'a%' GROUP BY city ORDER BY city LIMIT 10",
    ),
    (
        "update",
        "UPDATE /* @proxy route=hash;shard=3 */ users SET name = 'x', age = age + 1 WHERE id IN (1, 2, 3)",
    ),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, sql) in QUERIES {
        group.throughput(Throughput::Bytes(sql.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), sql, |b, sql| {
            b.iter(|| SqlTree::parse(black_box(sql)).unwrap());
        });
    }
    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    for (name, sql) in QUERIES {
        let tree = SqlTree::parse(sql).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| {
                for shard in 0..8 {
                    let options =
                        RewriteOptions::new("db_0", format!("users_{shard}")).with_limit(20, 0);
                    black_box(Rewriter::new(tree, options).rewrite().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_insert_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_split");
    for rows in [10usize, 100] {
        let values: Vec<String> = (0..rows).map(|i| format!("({i}, 'name{i}')")).collect();
        let sql = format!("INSERT INTO users (id, name) VALUES {}", values.join(", "));
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &sql, |b, sql| {
            b.iter(|| {
                let tree = SqlTree::parse(sql).unwrap();
                let insert = InsertSemantics::from_tree(&tree).unwrap();
                for shard in 0..2 {
                    let rows = insert.row_subtrees.iter().copied().skip(shard).step_by(2);
                    let options = RewriteOptions::new("db_0", format!("users_{shard}"));
                    black_box(Rewriter::new(&tree, options).with_rows(rows).rewrite().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let template = SqlTree::parse("SELECT id FROM users WHERE id = ? AND age > ? LIMIT ?").unwrap();
    let literal = SqlTree::parse("SELECT id FROM users WHERE id = 42 AND age > 18 LIMIT 10").unwrap();
    c.bench_function("extract", |b| {
        b.iter(|| extract(black_box(&template), black_box(&literal)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_rewrite,
    bench_insert_split,
    bench_extract
);
criterion_main!(benches);
