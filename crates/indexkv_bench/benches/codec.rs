//! Key encoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexkv_bench::random_text;
use indexkv_codec::{compose_key, encode_value, key_id, EncodeOptions, FieldValue, SortOrder};

/// Benchmark string encoding for every order.
fn bench_encode_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_string");

    for len in [8, 32, 128].iter() {
        let value = FieldValue::from(random_text(*len));
        group.throughput(Throughput::Elements(1));

        for order in [
            SortOrder::Unordered,
            SortOrder::Ascending,
            SortOrder::Descending,
        ] {
            let options = EncodeOptions::new(order);
            group.bench_with_input(
                BenchmarkId::new(order.to_string(), len),
                &value,
                |b, value| {
                    b.iter(|| {
                        let encoded = encode_value(black_box(value), &options).unwrap();
                        black_box(encoded);
                    });
                },
            );
        }

        let raw = EncodeOptions {
            base32: false,
            ..EncodeOptions::new(SortOrder::Descending)
        };
        group.bench_with_input(
            BenchmarkId::new("descending_raw", len),
            &value,
            |b, value| {
                b.iter(|| {
                    let encoded = encode_value(black_box(value), &raw).unwrap();
                    black_box(encoded);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark numeric encoding.
fn bench_encode_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_number");
    let ascending = EncodeOptions::new(SortOrder::Ascending);
    let descending = EncodeOptions::new(SortOrder::Descending);

    group.bench_function("integer", |b| {
        let value = FieldValue::Integer(-1_234_567);
        b.iter(|| black_box(encode_value(black_box(&value), &ascending).unwrap()));
    });

    group.bench_function("float_descending", |b| {
        let value = FieldValue::Float(-3.25);
        b.iter(|| black_box(encode_value(black_box(&value), &descending).unwrap()));
    });

    group.finish();
}

/// Benchmark key composition and id extraction.
fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");
    let value = encode_value(
        &FieldValue::from("category-7"),
        &EncodeOptions::new(SortOrder::Ascending),
    )
    .unwrap();
    let id = "0b6a3c1e-33f7-4b8c-9d0e-5f1a2b3c4d5e";

    group.bench_function("compose", |b| {
        b.iter(|| {
            let key = compose_key(
                black_box("entries"),
                black_box("asc:category"),
                black_box(&value),
                black_box(id),
            );
            black_box(key);
        });
    });

    let key = compose_key("entries", "asc:category", &value, id);
    group.bench_function("key_id", |b| {
        b.iter(|| black_box(key_id(black_box(&key)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_encode_string, bench_encode_number, bench_keys);
criterion_main!(benches);
