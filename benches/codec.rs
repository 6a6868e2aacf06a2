#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use slimcbor::{encoded_len, from_slice, to_vec, CborDecode, CborEncode, MapEntries, SkipLimits};

#[derive(Debug, PartialEq, CborEncode, CborDecode)]
struct Reading {
    sensor: String,
    seq: u64,
    delta: i32,
    value: f64,
    tags: Vec<String>,
}

fn sample_readings() -> Vec<Reading> {
    (0..64_u64)
        .map(|i| Reading {
            sensor: format!("s{i:03}"),
            seq: i * 1_000_003,
            delta: i32::try_from(i).unwrap() - 32,
            value: f64::from(u32::try_from(i).unwrap()) * 0.5,
            tags: vec!["a".into(), "bb".into()],
        })
        .collect()
}

fn sample_map() -> Vec<u8> {
    let entries = (0..256_u32).map(|i| (format!("k{i:03}"), i)).collect();
    to_vec(&MapEntries::new(entries)).unwrap()
}

fn bench_codec(c: &mut Criterion) {
    let readings = sample_readings();

    c.bench_function("size_readings", |b| {
        b.iter(|| black_box(encoded_len(black_box(&readings)).unwrap()))
    });

    c.bench_function("encode_readings", |b| {
        b.iter(|| black_box(to_vec(black_box(&readings)).unwrap()))
    });

    let encoded = to_vec(&readings).unwrap();
    c.bench_function("decode_readings", |b| {
        b.iter(|| black_box(from_slice::<Vec<Reading>>(black_box(&encoded)).unwrap()))
    });

    let map = sample_map();
    c.bench_function("skip_map", |b| {
        b.iter(|| {
            let mut d = slimcbor::Decoder::new(black_box(&map));
            d.skip().unwrap();
            black_box(d.position())
        })
    });

    let limits = SkipLimits::for_bytes(map.len());
    c.bench_function("skip_map_with_limits", |b| {
        b.iter(|| {
            let mut d = slimcbor::Decoder::new(black_box(&map));
            d.skip_with_limits(limits).unwrap();
            black_box(d.position())
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
