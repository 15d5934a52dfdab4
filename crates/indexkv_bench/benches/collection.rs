//! Indexed collection benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexkv_bench::{generate_entries, Entry};
use indexkv_core::{CollectionConfig, Index, IndexedCollection, Query};
use indexkv_storage::InMemoryStore;

fn indexes() -> Vec<Index> {
    vec![
        Index::by_equality("category"),
        Index::by_equality("created").descending(),
    ]
}

fn collection(journal: bool) -> IndexedCollection<Entry, InMemoryStore> {
    IndexedCollection::new(
        InMemoryStore::new(),
        CollectionConfig::new("entries").journal(journal),
        indexes(),
    )
    .unwrap()
}

/// Benchmark saving new records, with and without the journal.
fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");

    for journal in [false, true] {
        let name = if journal { "journaled" } else { "plain" };
        group.throughput(Throughput::Elements(1));
        group.bench_function(name, |b| {
            let entries = generate_entries(1_000, 10, 256);
            let entries_collection = collection(journal);
            let mut i = 0;
            b.iter(|| {
                entries_collection
                    .save(black_box(&entries[i % entries.len()]))
                    .unwrap();
                i += 1;
            });
        });
    }

    group.finish();
}

/// Benchmark replacing a record whose indexed fields changed.
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let entries_collection = collection(false);
    let mut entry = generate_entries(1, 1, 256).remove(0);
    entries_collection.save(&entry).unwrap();

    group.bench_function("reindex", |b| {
        b.iter(|| {
            entry.created = entry.created.wrapping_add(1);
            entries_collection.save(black_box(&entry)).unwrap();
        });
    });

    group.finish();
}

/// Benchmark queries against a populated collection.
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for count in [100, 1_000, 10_000].iter() {
        let entries_collection = collection(false);
        let entries = generate_entries(*count, 10, 64);
        for entry in &entries {
            entries_collection.save(entry).unwrap();
        }
        let probe = entries[count / 2].id.clone();

        group.bench_with_input(BenchmarkId::new("equals", count), count, |b, _| {
            let query = Query::equals("category", "category-3");
            b.iter(|| black_box(entries_collection.query(black_box(&query)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("newest", count), count, |b, _| {
            let query = Query::all("created").descending().limit(10);
            b.iter(|| black_box(entries_collection.query(black_box(&query)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("get", count), count, |b, _| {
            b.iter(|| black_box(entries_collection.get(black_box(&probe)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_save, bench_update, bench_query);
criterion_main!(benches);
