//! Benchmarks for the tile data codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tmxtile::io::tile_data::{decode, encode};
use tmxtile::{Compression, EncodingContext};

const WIDTH: u32 = 128;

/// A 128×128 layer with a repeating pattern and some flipped tiles
fn layer_gids() -> Vec<u32> {
    (0..WIDTH * WIDTH)
        .map(|i| match i % 7 {
            0 => 0,
            3 => 0x8000_0000 | (i % 40 + 1),
            _ => i % 40 + 1,
        })
        .collect()
}

fn contexts() -> [(&'static str, EncodingContext); 4] {
    [
        ("xml", EncodingContext::XML),
        ("csv", EncodingContext::CSV),
        ("base64", EncodingContext::BASE64),
        ("base64_gzip", EncodingContext::base64(Compression::Gzip)),
    ]
}

// -- Encoding benchmarks --

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let gids = layer_gids();

    for (name, context) in contexts() {
        group.bench_function(name, |b| {
            b.iter(|| encode(context, WIDTH, black_box(&gids)).unwrap())
        });
    }

    group.finish();
}

// -- Decoding benchmarks --

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let gids = layer_gids();

    for (name, context) in contexts() {
        let payload = encode(context, WIDTH, &gids).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| decode(context, black_box(&payload)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
