//! Exact brute-force cosine similarity index.
//!
//! Built once from all encoded item vectors; answers k-nearest queries
//! against arbitrary query vectors of the same width. There is no insert or
//! delete: a new catalog build means a new index.

use rayon::prelude::*;

/// Brute-force cosine k-NN store.
///
/// Distances are `1 − cosine_similarity` with similarity clamped to [0, 1].
/// A zero vector on either side of a pair has undefined cosine similarity;
/// the index reports similarity 0 (distance 1) for such pairs instead of
/// failing, so a query entirely outside the vocabulary still ranks every
/// item (all at distance 1, catalog order preserved).
#[derive(Debug)]
pub struct SimilarityIndex {
    vectors: Vec<Vec<f32>>,
    norms: Vec<f32>,
    width: usize,
}

impl SimilarityIndex {
    /// Build the index from encoded item vectors (one per catalog item, in
    /// catalog order)
    pub fn build(vectors: Vec<Vec<f32>>) -> Self {
        let width = vectors.first().map(Vec::len).unwrap_or(0);
        debug_assert!(vectors.iter().all(|v| v.len() == width));

        let norms: Vec<f32> = vectors
            .par_iter()
            .map(|v| v.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect();

        Self {
            vectors,
            norms,
            width,
        }
    }

    /// Number of indexed vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector width the index was built with
    pub fn width(&self) -> usize {
        self.width
    }

    /// The `k` nearest items to `query` by cosine distance, ascending.
    ///
    /// Ties keep catalog order (stable sort). `k` larger than the index size
    /// returns every item.
    pub fn k_nearest(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        debug_assert_eq!(query.len(), self.width);

        let query_norm = query.iter().map(|x| x * x).sum::<f32>().sqrt();

        let mut neighbors: Vec<(usize, f32)> = self
            .vectors
            .par_iter()
            .zip(self.norms.par_iter())
            .enumerate()
            .map(|(i, (vector, &norm))| {
                let similarity = if query_norm == 0.0 || norm == 0.0 {
                    0.0
                } else {
                    (dot(query, vector) / (query_norm * norm)).clamp(0.0, 1.0)
                };
                (i, 1.0 - similarity)
            })
            .collect();

        neighbors.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        neighbors.truncate(k);
        neighbors
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
