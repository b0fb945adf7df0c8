//! Filter to remove the user's favorite movies.
//!
//! Favorites are excluded from every pool: the user already knows them, so
//! recommending them back is never useful. Typically the first filter in the
//! pipeline.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Catalog, UserProfile};
use retrieval::Candidate;
use std::sync::Arc;

/// Removes candidates whose item id is in the profile's favorite set.
///
/// Candidates carry positional indices, so the catalog is needed to resolve
/// them back to ids for the O(1) favorite lookup.
pub struct FavoriteExclusionFilter {
    catalog: Arc<Catalog>,
}

impl FavoriteExclusionFilter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Filter for FavoriteExclusionFilter {
    fn name(&self) -> &str {
        "FavoriteExclusionFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                self.catalog
                    .movie(candidate.item_index)
                    .is_some_and(|movie| !profile.favorite_movies.contains(&movie.id))
            })
            .collect();
        Ok(filtered)
    }
}
