//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use catalog::UserProfile;
use retrieval::Candidate;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(FavoriteExclusionFilter::new(catalog.clone()))
///     .add_filter(MinimumRatingFilter::new(catalog.clone(), 7.0));
///
/// let filtered = pipeline.apply(candidates, &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, profile)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FavoriteExclusionFilter;
    use catalog::{Catalog, CatalogOptions, CatalogRecord};
    use retrieval::PoolSource;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn test_catalog() -> Arc<Catalog> {
        let records = (1..=3)
            .map(|i| CatalogRecord {
                id: format!("tt{}", i),
                title: format!("Movie {}", i),
                genres: vec!["Action".to_string()],
                runtime_minutes: Some(100),
                average_rating: Some(8.0),
            })
            .collect();
        Arc::new(Catalog::build(records, &CatalogOptions::default()).unwrap())
    }

    fn test_profile(favorites: &[&str]) -> UserProfile {
        UserProfile {
            user_id: "user_test".to_string(),
            preferred_genres: vec!["Action".to_string()],
            average_watch_time: 100,
            favorite_movies: favorites.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let profile = test_profile(&[]);

        let candidates = vec![
            Candidate::new(0, PoolSource::Tailored, 0.9),
            Candidate::new(1, PoolSource::Diversified, 0.0),
        ];

        let filtered = pipeline.apply(candidates, &profile).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let catalog = test_catalog();
        let profile = test_profile(&["tt1"]);

        let pipeline = FilterPipeline::new()
            .add_filter(FavoriteExclusionFilter::new(catalog));

        let candidates = vec![
            Candidate::new(0, PoolSource::Tailored, 0.9),
            Candidate::new(1, PoolSource::Tailored, 0.8),
        ];

        let filtered = pipeline.apply(candidates, &profile).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item_index, 1);
    }
}
