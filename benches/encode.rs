use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_forge::{ECLevel, EncodeOptions, encode, encode_with_options};

fn bench_encode_numeric_v1(c: &mut Criterion) {
    c.bench_function("encode_numeric_v1", |b| {
        b.iter(|| encode(black_box("01234567"), black_box(ECLevel::M)))
    });
}

fn bench_encode_url(c: &mut Criterion) {
    let url = "https://example.com/some/longer/path?with=query&and=more";
    c.bench_function("encode_url", |b| {
        b.iter(|| encode(black_box(url), black_box(ECLevel::M)))
    });
}

fn bench_encode_v10_full(c: &mut Criterion) {
    let data = vec![b'x'; 271];
    c.bench_function("encode_v10_l_full", |b| {
        b.iter(|| encode(black_box(&data), black_box(ECLevel::L)))
    });
}

fn bench_encode_v40(c: &mut Criterion) {
    let data = vec![b'x'; 2000];
    let options = EncodeOptions::new(ECLevel::L).with_max_version(40);
    c.bench_function("encode_v40_sequential", |b| {
        b.iter(|| encode_with_options(black_box(&data), &options.with_parallel_masks(false)))
    });
    c.bench_function("encode_v40_parallel", |b| {
        b.iter(|| encode_with_options(black_box(&data), &options.with_parallel_masks(true)))
    });
}

criterion_group!(
    benches,
    bench_encode_numeric_v1,
    bench_encode_url,
    bench_encode_v10_full,
    bench_encode_v40
);
criterion_main!(benches);
