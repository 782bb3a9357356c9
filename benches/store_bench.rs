//! Benchmarks for rosterdb store operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rosterdb::{Config, RecordFactory, RecordStore};
use tempfile::TempDir;

fn store_benchmarks(c: &mut Criterion) {
    // Add (each iteration persists the whole snapshot)
    c.bench_function("store_add", |b| {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder()
            .db_path(temp_dir.path().join("roster.db"))
            .max_employees(u32::MAX)
            .build();
        let store = RecordStore::open(config).unwrap();
        let factory = RecordFactory::new();

        b.iter(|| {
            black_box(store.add(&factory).unwrap());
        });
    });

    // Point reads against a populated store
    c.bench_function("store_get", |b| {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder()
            .db_path(temp_dir.path().join("roster.db"))
            .build();
        let store = RecordStore::open(config).unwrap();
        let factory = RecordFactory::new();

        let mut ids = vec![];
        for _ in 0..1_000 {
            ids.push(store.add(&factory).unwrap());
        }

        let mut cursor = 0;
        b.iter(|| {
            let id = ids[cursor % ids.len()];
            cursor += 1;
            black_box(store.get(id));
        });
    });

    // Full-scan field query over 1k records
    c.bench_function("store_query_department", |b| {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder()
            .db_path(temp_dir.path().join("roster.db"))
            .build();
        let store = RecordStore::open(config).unwrap();
        let factory = RecordFactory::new();

        for _ in 0..1_000 {
            store.add(&factory).unwrap();
        }

        b.iter(|| {
            black_box(store.query_by_field("department", ">=", "5").unwrap());
        });
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
