// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rewrite throughput benchmarks
//!
//! Run with: cargo bench -p sqlany-dialect-rewrite

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlany_dialect_rewrite::{Emitter, SqlAnywhereEmitter, rewrite_sql};
use sqlany_dialect_test_utils::{SqlFixtures, StatementFixtures};

fn bench_raw_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_rewrite");

    group.bench_function("no_keywords", |b| {
        b.iter(|| rewrite_sql(black_box(SqlFixtures::simple_select())))
    });

    for depth in [0, 2, 8] {
        let sql = SqlFixtures::nested_limits(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &sql, |b, sql| {
            b.iter(|| rewrite_sql(black_box(sql)))
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let emitter = SqlAnywhereEmitter::new();

    let distinct = StatementFixtures::distinct_ordered();
    group.bench_function("distinct_ordered", |b| {
        b.iter(|| emitter.emit(black_box(&distinct)))
    });

    for depth in [0, 2, 8] {
        let statement = StatementFixtures::nested(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &statement, |b, statement| {
            b.iter(|| emitter.emit(black_box(statement)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raw_rewrite, bench_emit);
criterion_main!(benches);
