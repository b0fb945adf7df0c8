//! # Retrieval Crate
//!
//! This crate implements candidate retrieval for movie recommendations.
//!
//! ## Components
//!
//! ### Genre Encoder
//! Binary feature vectors over a frozen, sorted genre vocabulary derived
//! from the catalog at build time.
//!
//! ### Similarity Index
//! Exact brute-force cosine k-NN over the encoded catalog. No approximate
//! structures, no incremental updates - built once per catalog load.
//!
//! ### Tailored Source
//! "More of what you like": nearest items to the user's preferred-genre
//! vector, similarity taken from the index.
//!
//! ### Diversified Source
//! "Something different": items sharing no genre with the user's
//! preferences, similarity forced to zero so ranking falls to rating and
//! runtime fit.
//!
//! ## Example Usage
//!
//! ```ignore
//! use retrieval::{DiversifiedSource, GenreVocabulary, SimilarityIndex, TailoredSource};
//! use std::sync::Arc;
//!
//! let vocabulary = Arc::new(GenreVocabulary::from_catalog(&catalog));
//! let vectors = catalog.movies().iter().map(|m| vocabulary.encode(&m.genres)).collect();
//! let index = Arc::new(SimilarityIndex::build(vectors));
//!
//! let tailored = TailoredSource::new(vocabulary.clone(), index.clone());
//! let diversified = DiversifiedSource::new(catalog.clone());
//!
//! let near = tailored.get_candidates(&profile, 200);
//! let away = diversified.get_candidates(&profile);
//! ```

// Public modules
pub mod diversified;
pub mod encoder;
pub mod index;
pub mod tailored;
pub mod types;

// Re-export commonly used types
pub use diversified::DiversifiedSource;
pub use encoder::GenreVocabulary;
pub use index::SimilarityIndex;
pub use tailored::TailoredSource;
pub use types::{Candidate, PoolSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_index_round_trip() {
        let vocabulary = GenreVocabulary::from_labels(["Action", "Drama"].map(String::from));
        let vectors = vec![
            vocabulary.encode(&["Action".to_string()]),
            vocabulary.encode(&["Drama".to_string()]),
        ];
        let index = SimilarityIndex::build(vectors);

        let query = vocabulary.encode(&["Action".to_string()]);
        let neighbors = index.k_nearest(&query, 2);

        assert_eq!(neighbors[0].0, 0);
        assert!(neighbors[0].1.abs() < 1e-6);
        assert_eq!(neighbors[1].0, 1);
    }
}
