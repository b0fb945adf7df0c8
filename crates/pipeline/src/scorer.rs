//! Composite scoring of filtered candidates.
//!
//! ## Formula
//! `total = 0.7 · similarity + 0.3 · (rating_score + runtime_score) / 2`,
//! rounded to 2 decimal places. The additive form keeps zero-similarity
//! (diversified) candidates rankable on rating and runtime fit; a
//! multiplicative form would collapse all of them to 0.

use catalog::Movie;
use retrieval::{Candidate, PoolSource};

/// Weight of cosine similarity in the composite score
const SIMILARITY_WEIGHT: f32 = 0.7;
/// Weight of the averaged rating / runtime-fit term
const QUALITY_WEIGHT: f32 = 0.3;

/// A fully scored candidate.
///
/// Exists only within one recommendation request; recomputed every time,
/// never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate {
    pub item_index: usize,
    pub source: PoolSource,
    /// Cosine similarity in [0, 1]
    pub similarity: f32,
    /// `average_rating / 10` in [0, 1]; 0 when the rating is absent
    pub rating_score: f32,
    /// `1 / (1 + |runtime − watch_time|)` in (0, 1]
    pub runtime_score: f32,
    /// Composite score in [0, 1], rounded to 2 decimals
    pub total_score: f32,
}

/// Computes composite scores from similarity, rating and runtime fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer;

impl Scorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one candidate against the user's average watch time
    pub fn score(&self, candidate: &Candidate, movie: &Movie, watch_time: u32) -> ScoredCandidate {
        let rating_score = movie.average_rating.unwrap_or(0.0) / 10.0;

        let runtime_gap = (movie.runtime_minutes as i64 - watch_time as i64).unsigned_abs() as f32;
        let runtime_score = 1.0 / (1.0 + runtime_gap);

        let total = SIMILARITY_WEIGHT * candidate.similarity
            + QUALITY_WEIGHT * ((rating_score + runtime_score) / 2.0);

        ScoredCandidate {
            item_index: candidate.item_index,
            source: candidate.source,
            similarity: candidate.similarity,
            rating_score,
            runtime_score,
            total_score: round2(total),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
