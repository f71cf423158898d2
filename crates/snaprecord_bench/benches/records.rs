//! Record lifecycle benchmarks.
//!
//! Every save rewrites the whole collection, so cost grows with the
//! number of records already stored.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use snaprecord_bench::{sample_collection, COLLECTION_SIZES};
use snaprecord_core::{Config, Record, RecordType};
use snaprecord_storage::{InMemoryKv, KvClient};
use std::sync::Arc;
use tempfile::TempDir;

const PROPERTIES: [&str; 3] = ["title", "body", "tags"];

fn local_type(dir: &TempDir) -> Arc<RecordType> {
    Arc::new(
        RecordType::builder("Post")
            .properties(PROPERTIES)
            .config(Config::new().root(dir.path()))
            .build()
            .unwrap(),
    )
}

fn kv_type() -> Arc<RecordType> {
    let client: Arc<dyn KvClient> = Arc::new(InMemoryKv::new());
    Arc::new(
        RecordType::builder("Post")
            .properties(PROPERTIES)
            .key_value(client)
            .build()
            .unwrap(),
    )
}

/// Benchmark updating one record inside collections of growing size.
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_local");
    group.sample_size(30);

    for size in COLLECTION_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let schema = local_type(&dir);
            schema.write_contents(&sample_collection(size)).unwrap();
            let mut record = schema.collection().last(1).unwrap().one().unwrap();

            let mut n = 0u64;
            b.iter(|| {
                n += 1;
                record.set("title", format!("edit {n}"));
                black_box(record.save().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark creating a record in a key-value collection of growing size.
fn bench_create_kv(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_kv");

    for size in COLLECTION_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let schema = kv_type();
            let seed = sample_collection(size);

            b.iter(|| {
                schema.write_contents(&seed).unwrap();
                let mut record = Record::new(&schema, [("title", "new")]);
                black_box(record.save().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark loading whole collections.
fn bench_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_local");

    for size in COLLECTION_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let schema = local_type(&dir);
            schema.write_contents(&sample_collection(size)).unwrap();
            let collection = schema.collection();

            b.iter(|| {
                let records = collection.all().unwrap();
                black_box(records);
            });
        });
    }

    group.finish();
}

/// Benchmark array-membership lookups that miss.
fn bench_find_by_attribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_by_attribute_miss");

    for size in COLLECTION_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let schema = kv_type();
            schema.write_contents(&sample_collection(size)).unwrap();
            let collection = schema.collection();

            b.iter(|| {
                let found = collection
                    .find_by_attribute("tags", black_box("no-such-tag"))
                    .unwrap();
                black_box(found);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_update,
    bench_create_kv,
    bench_all,
    bench_find_by_attribute
);
criterion_main!(benches);
