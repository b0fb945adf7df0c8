//! Tailored pool - nearest-neighbor retrieval over preferred genres.
//!
//! ## Algorithm
//! 1. Encode the user's preferred genres with the frozen vocabulary
//! 2. Query the similarity index for the `depth` nearest items
//! 3. Convert cosine distance back to similarity (`1 − distance`)
//!
//! Favorite exclusion and the rating threshold are applied downstream by the
//! filter pipeline, not here.

use crate::encoder::GenreVocabulary;
use crate::index::SimilarityIndex;
use crate::types::{Candidate, PoolSource};
use catalog::UserProfile;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates near the user's genre preferences
pub struct TailoredSource {
    vocabulary: Arc<GenreVocabulary>,
    index: Arc<SimilarityIndex>,
}

impl TailoredSource {
    pub fn new(vocabulary: Arc<GenreVocabulary>, index: Arc<SimilarityIndex>) -> Self {
        Self { vocabulary, index }
    }

    /// Retrieve up to `depth` candidates for a user, nearest first.
    ///
    /// A profile whose preferred genres all fall outside the vocabulary
    /// encodes to the zero vector; the index then reports similarity 0 for
    /// every item and the pool still ranks on the remaining score factors.
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub fn get_candidates(&self, profile: &UserProfile, depth: usize) -> Vec<Candidate> {
        let query = self.vocabulary.encode(&profile.preferred_genres);

        let candidates: Vec<Candidate> = self
            .index
            .k_nearest(&query, depth)
            .into_iter()
            .map(|(item_index, distance)| {
                Candidate::new(
                    item_index,
                    PoolSource::Tailored,
                    (1.0 - distance).clamp(0.0, 1.0),
                )
            })
            .collect();

        debug!("retrieved {} tailored candidates", candidates.len());
        candidates
    }
}
