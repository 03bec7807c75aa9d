use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_asv::{from_record, to_record, Decoder, Encoder, Record};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn encoded(size: u32) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new());
    for product in products(size) {
        encoder.serialize(&product).unwrap();
    }
    encoder.flush();
    encoder.into_inner()
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_records");

    for size in [10, 100, 1000].iter() {
        let records: Vec<Record> = products(*size)
            .iter()
            .map(|p| to_record(p).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let mut encoder = Encoder::new(Vec::with_capacity(64 * records.len()));
                encoder.write_all(black_box(records)).unwrap();
                encoder.into_inner()
            })
        });
    }
    group.finish();
}

fn benchmark_read_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_record");

    for size in [10, 100, 1000].iter() {
        let bytes = encoded(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut decoder = Decoder::new(black_box(&bytes[..]));
                let mut count = 0;
                while decoder.read_record().unwrap().is_some() {
                    count += 1;
                }
                count
            })
        });
    }
    group.finish();
}

fn benchmark_read_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_all");

    for size in [10, 100, 1000].iter() {
        let bytes = encoded(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| Decoder::new(black_box(&bytes[..])).read_all().unwrap())
        });
    }
    group.finish();
}

fn benchmark_deserialize(c: &mut Criterion) {
    let record = to_record(&products(1)[0]).unwrap();

    c.bench_function("deserialize_record", |b| {
        b.iter(|| from_record::<Product>(black_box(&record)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_encode,
    benchmark_read_record,
    benchmark_read_all,
    benchmark_deserialize
);
criterion_main!(benches);
