//! Diversified pool - discovery outside the user's preferred genres.
//!
//! ## Algorithm
//! 1. Scan the full catalog in order
//! 2. Keep items whose genre list has zero overlap with the preferred genres
//! 3. Force similarity to 0 so these candidates rank purely on the other
//!    score factors
//!
//! Favorite exclusion and the rating threshold are applied downstream by the
//! filter pipeline, not here.

use crate::types::{Candidate, PoolSource};
use catalog::{Catalog, UserProfile};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates deliberately away from the user's genre preferences
pub struct DiversifiedSource {
    catalog: Arc<Catalog>,
}

impl DiversifiedSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// All genre-disjoint items in catalog order, similarity forced to 0
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub fn get_candidates(&self, profile: &UserProfile) -> Vec<Candidate> {
        let preferred: HashSet<&str> = profile
            .preferred_genres
            .iter()
            .map(String::as_str)
            .collect();

        let candidates: Vec<Candidate> = self
            .catalog
            .movies()
            .iter()
            .enumerate()
            .filter(|(_, movie)| {
                movie
                    .genres
                    .iter()
                    .all(|genre| !preferred.contains(genre.as_str()))
            })
            .map(|(item_index, _)| Candidate::new(item_index, PoolSource::Diversified, 0.0))
            .collect();

        debug!("retrieved {} diversified candidates", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogOptions, CatalogRecord};

    fn record(id: &str, genres: &[&str]) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            title: format!("Movie {}", id),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            runtime_minutes: Some(100),
            average_rating: Some(7.5),
        }
    }

    fn profile(genres: &[&str]) -> UserProfile {
        UserProfile {
            user_id: "user_test".to_string(),
            preferred_genres: genres.iter().map(|s| s.to_string()).collect(),
            average_watch_time: 100,
            favorite_movies: HashSet::new(),
        }
    }

    fn build_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::build(
                vec![
                    record("tt1", &["Action"]),
                    record("tt2", &["Action", "Comedy"]),
                    record("tt3", &["Drama"]),
                    record("tt4", &["Horror", "Thriller"]),
                ],
                &CatalogOptions::default(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_keeps_only_genre_disjoint_items() {
        let catalog = build_catalog();
        let source = DiversifiedSource::new(catalog.clone());
        let candidates = source.get_candidates(&profile(&["Action"]));

        // tt2 shares "Action" through one of its genres, so only tt3 and tt4 qualify
        let indices: Vec<usize> = candidates.iter().map(|c| c.item_index).collect();
        assert_eq!(indices, vec![2, 3]);
        for candidate in &candidates {
            assert_eq!(candidate.similarity, 0.0);
            assert_eq!(candidate.source, PoolSource::Diversified);
            let movie = catalog.movie(candidate.item_index).unwrap();
            assert!(movie.genres.iter().all(|g| g != "Action"));
        }
    }

    #[test]
    fn test_unknown_preferred_genres_keep_everything() {
        let catalog = build_catalog();
        let source = DiversifiedSource::new(catalog.clone());
        let candidates = source.get_candidates(&profile(&["Polka"]));
        assert_eq!(candidates.len(), catalog.len());
    }

    #[test]
    fn test_all_genres_preferred_empties_the_pool() {
        let catalog = build_catalog();
        let source = DiversifiedSource::new(catalog);
        let candidates = source.get_candidates(&profile(&[
            "Action", "Comedy", "Drama", "Horror", "Thriller",
        ]));
        assert!(candidates.is_empty());
    }
}
