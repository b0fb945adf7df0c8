//! Benchmarks for the brute-force similarity search
//!
//! Run with: cargo bench --package retrieval
//!
//! Uses a synthetic catalog so the bench needs no data files on disk.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use retrieval::{GenreVocabulary, SimilarityIndex};

const GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Drama", "Fantasy",
    "Horror", "Mystery", "Romance", "Sci-Fi", "Thriller", "Western",
];

fn synthetic_index(items: usize) -> (GenreVocabulary, SimilarityIndex) {
    let vocabulary = GenreVocabulary::from_labels(GENRES.iter().map(|s| s.to_string()));

    // Deterministic pseudo-random genre assignment, 1-3 genres per item
    let vectors = (0..items)
        .map(|i| {
            let genres: Vec<String> = (0..=(i % 3))
                .map(|j| GENRES[(i * 7 + j * 5) % GENRES.len()].to_string())
                .collect();
            vocabulary.encode(&genres)
        })
        .collect();

    let index = SimilarityIndex::build(vectors);
    (vocabulary, index)
}

fn bench_index_build(c: &mut Criterion) {
    let vocabulary = GenreVocabulary::from_labels(GENRES.iter().map(|s| s.to_string()));
    let vectors: Vec<Vec<f32>> = (0..50_000)
        .map(|i| vocabulary.encode(&[GENRES[i % GENRES.len()].to_string()]))
        .collect();

    c.bench_function("similarity_index_build_50k", |b| {
        b.iter(|| {
            let index = SimilarityIndex::build(black_box(vectors.clone()));
            black_box(index)
        })
    });
}

fn bench_k_nearest(c: &mut Criterion) {
    let (vocabulary, index) = synthetic_index(50_000);
    let query = vocabulary.encode(&["Action".to_string(), "Sci-Fi".to_string()]);

    c.bench_function("k_nearest_200_of_50k", |b| {
        b.iter(|| {
            let neighbors = index.k_nearest(black_box(&query), black_box(200));
            black_box(neighbors)
        })
    });
}

criterion_group!(benches, bench_index_build, bench_k_nearest);
criterion_main!(benches);
