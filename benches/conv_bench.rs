use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mutils::{bytes, int, string, MString, MichelsonPacker, Z};

const TEXT: &str = "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG/metadata.json";

fn string_bytes_bench(c: &mut Criterion) {
    let text: MString = TEXT.parse().unwrap();
    let raw = bytes::of_string(&MichelsonPacker, &text).unwrap();
    c.bench_function("bytes_of_string", |b| {
        b.iter(|| bytes::of_string(&MichelsonPacker, black_box(&text)))
    });
    c.bench_function("string_of_bytes", |b| {
        b.iter(|| string::of_bytes(&MichelsonPacker, black_box(&raw)))
    });
}

fn decimal_bench(c: &mut Criterion) {
    let z = Z::from(-1234567890123456789i64);
    let s = string::of_int(&z);
    c.bench_function("string_of_int", |b| b.iter(|| string::of_int(black_box(&z))));
    c.bench_function("int_of_string", |b| b.iter(|| int::of_string(black_box(&s))));
}

criterion_group! {
    name = conv_benches;
    config = Criterion::default();
    targets = string_bytes_bench, decimal_bench
}

criterion_main!(conv_benches);
