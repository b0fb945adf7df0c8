//! Filter to enforce the request's rating threshold.
//!
//! Items without a stored rating count as 0 here, so any positive threshold
//! excludes unrated items; the stored `average_rating` itself stays `None`.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Catalog, UserProfile};
use retrieval::Candidate;
use std::sync::Arc;

/// Removes candidates rated below a threshold.
pub struct MinimumRatingFilter {
    catalog: Arc<Catalog>,
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// # Arguments
    /// * `catalog` - Shared catalog for rating lookups
    /// * `min_rating` - Inclusive lower bound on `average_rating`
    pub fn new(catalog: Arc<Catalog>, min_rating: f32) -> Self {
        Self {
            catalog,
            min_rating,
        }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                self.catalog
                    .movie(candidate.item_index)
                    .is_some_and(|movie| movie.average_rating.unwrap_or(0.0) >= self.min_rating)
            })
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogOptions, CatalogRecord};
    use retrieval::PoolSource;
    use std::collections::HashSet;

    fn record(id: &str, rating: Option<f32>) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            title: format!("Movie {}", id),
            genres: vec!["Action".to_string()],
            runtime_minutes: Some(100),
            average_rating: rating,
        }
    }

    fn test_profile() -> UserProfile {
        UserProfile {
            user_id: "user_test".to_string(),
            preferred_genres: vec!["Action".to_string()],
            average_watch_time: 100,
            favorite_movies: HashSet::new(),
        }
    }

    #[test]
    fn test_minimum_rating_filter() {
        let catalog = Arc::new(
            Catalog::build(
                vec![
                    record("tt1", Some(8.2)),
                    record("tt2", Some(6.9)),
                    record("tt3", Some(7.0)),
                ],
                &CatalogOptions::default(),
            )
            .unwrap(),
        );

        let candidates = vec![
            Candidate::new(0, PoolSource::Tailored, 0.9),
            Candidate::new(1, PoolSource::Tailored, 0.8),
            Candidate::new(2, PoolSource::Tailored, 0.7),
        ];

        let filter = MinimumRatingFilter::new(catalog, 7.0);
        let filtered = filter.apply(candidates, &test_profile()).unwrap();

        // Threshold is inclusive: 7.0 stays, 6.9 goes
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].item_index, 0);
        assert_eq!(filtered[1].item_index, 2);
    }

    #[test]
    fn test_unrated_items_fail_positive_threshold() {
        let catalog = Arc::new(
            Catalog::build(
                vec![record("tt1", None), record("tt2", Some(9.0))],
                &CatalogOptions::default(),
            )
            .unwrap(),
        );

        let candidates = vec![
            Candidate::new(0, PoolSource::Diversified, 0.0),
            Candidate::new(1, PoolSource::Diversified, 0.0),
        ];

        let filter = MinimumRatingFilter::new(catalog, 0.1);
        let filtered = filter.apply(candidates, &test_profile()).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item_index, 1);
    }

    #[test]
    fn test_zero_threshold_keeps_unrated_items() {
        let catalog = Arc::new(
            Catalog::build(vec![record("tt1", None)], &CatalogOptions::default()).unwrap(),
        );

        let candidates = vec![Candidate::new(0, PoolSource::Tailored, 0.5)];
        let filter = MinimumRatingFilter::new(catalog, 0.0);
        let filtered = filter.apply(candidates, &test_profile()).unwrap();
        assert_eq!(filtered.len(), 1);
    }
}
