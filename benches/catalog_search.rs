use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nursery_site::catalog::fuzzy::partial_ratio;
use nursery_site::{generate_embed_url, search, EmbedOptions, Plant};

fn catalog(size: usize) -> Vec<Plant> {
    let names = [
        "Snake Plant", "Aloe Vera", "Money Plant", "Monstera", "Peace Lily",
        "Rubber Plant", "Fiddle Leaf Fig", "Spider Plant", "ZZ Plant", "Pothos",
    ];
    (0..size)
        .map(|i| {
            Plant::new(i as i64, format!("{} {}", names[i % names.len()], i))
                .with_description("Easy care indoor plant for bright, indirect light")
        })
        .collect()
}

/// Benchmark the substring pass
fn bench_exact_search(c: &mut Criterion) {
    let plants = catalog(500);
    c.bench_function("search_exact", |b| {
        b.iter(|| search(black_box("lily"), black_box(&plants)))
    });
}

/// Benchmark the fuzzy fallback, which scores every name
fn bench_fuzzy_search(c: &mut Criterion) {
    let plants = catalog(500);
    c.bench_function("search_fuzzy_fallback", |b| {
        b.iter(|| search(black_box("monsterra"), black_box(&plants)))
    });
}

fn bench_partial_ratio(c: &mut Criterion) {
    c.bench_function("partial_ratio", |b| {
        b.iter(|| partial_ratio(black_box("alovera"), black_box("aloe vera barbadensis")))
    });
}

fn bench_embed_url(c: &mut Criterion) {
    let options = EmbedOptions::new().autoplay(true).looping(true).with_start(80).with_end(160);
    c.bench_function("generate_embed_url", |b| {
        b.iter(|| generate_embed_url(black_box("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), &options))
    });
}

criterion_group!(
    benches,
    bench_exact_search,
    bench_fuzzy_search,
    bench_partial_ratio,
    bench_embed_url
);
criterion_main!(benches);
