//! # Recommendation Engine
//!
//! This module coordinates the per-request pipeline:
//! 1. Validate request parameters
//! 2. Resolve the user profile
//! 3. Tailored pool: index retrieval -> filters -> scoring -> ranking
//! 4. Diversified pool: genre-disjoint scan -> filters -> scoring -> ranking
//! 5. Split the requested count, take from both pools, deduplicate by id
//!
//! Requests are stateless between calls: the same request against the same
//! catalog and user store returns bit-identical results. Different users can
//! be evaluated in parallel because catalog, vocabulary and index are
//! immutable once built.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use catalog::{Catalog, ItemId, UserId, UserProfile, UserStore};
use pipeline::filters::{FavoriteExclusionFilter, MinimumRatingFilter};
use pipeline::{FilterPipeline, ScoredCandidate, Scorer};
use retrieval::{DiversifiedSource, GenreVocabulary, SimilarityIndex, TailoredSource};

use crate::error::{RecommendError, Result};

/// Fixed over-fetch depth for the tailored index query.
///
/// Retrieval happens before the favorite/rating filters, so the query asks
/// for more neighbors than any sane request size; catalogs smaller than this
/// simply return everything.
const RETRIEVAL_DEPTH: usize = 200;

/// Parameters of one recommendation request
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub user_id: UserId,
    /// How many rows to return (default 10)
    pub n_recommendations: usize,
    /// Fraction of the result drawn from the diversified pool, in [0, 1]
    /// (default 0.5)
    pub diversified_ratio: f32,
    /// Inclusive rating threshold applied to both pools (default 7.0)
    pub min_rating: f32,
}

impl RecommendationRequest {
    pub const DEFAULT_COUNT: usize = 10;
    pub const DEFAULT_DIVERSIFIED_RATIO: f32 = 0.5;
    pub const DEFAULT_MIN_RATING: f32 = 7.0;

    /// A request for `user_id` with default parameters
    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            n_recommendations: Self::DEFAULT_COUNT,
            diversified_ratio: Self::DEFAULT_DIVERSIFIED_RATIO,
            min_rating: Self::DEFAULT_MIN_RATING,
        }
    }

    pub fn with_count(mut self, n_recommendations: usize) -> Self {
        self.n_recommendations = n_recommendations;
        self
    }

    pub fn with_diversified_ratio(mut self, ratio: f32) -> Self {
        self.diversified_ratio = ratio;
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = min_rating;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.n_recommendations == 0 {
            return Err(RecommendError::InvalidParameters {
                reason: "n_recommendations must be positive".to_string(),
            });
        }
        // NaN fails both comparisons
        if !(self.diversified_ratio >= 0.0 && self.diversified_ratio <= 1.0) {
            return Err(RecommendError::InvalidParameters {
                reason: format!(
                    "diversified_ratio must be within [0, 1], got {}",
                    self.diversified_ratio
                ),
            });
        }
        Ok(())
    }
}

/// One recommended item, the payload a downstream exporter consumes verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub title: String,
    pub genres: Vec<String>,
    pub runtime_minutes: u32,
    pub average_rating: Option<f32>,
    pub total_score: f32,
}

/// Main engine coordinating retrieval, filtering, scoring and merging.
///
/// Construction derives the genre vocabulary, encodes every catalog item and
/// builds the similarity index; all of it is immutable afterwards.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    users: Arc<UserStore>,
    tailored: TailoredSource,
    diversified: DiversifiedSource,
    scorer: Scorer,
}

impl RecommendationEngine {
    /// Build the engine over a loaded catalog and user store.
    ///
    /// Fails with `EmptyCatalog` when nothing survived preprocessing - there
    /// is no index to build and every request would be unanswerable.
    pub fn new(catalog: Arc<Catalog>, users: Arc<UserStore>) -> Result<Self> {
        if catalog.is_empty() {
            return Err(RecommendError::EmptyCatalog);
        }

        let vocabulary = Arc::new(GenreVocabulary::from_catalog(&catalog));
        let vectors = catalog
            .movies()
            .iter()
            .map(|movie| vocabulary.encode(&movie.genres))
            .collect();
        let index = Arc::new(SimilarityIndex::build(vectors));
        info!(
            items = catalog.len(),
            vocabulary = vocabulary.len(),
            "similarity index built"
        );

        let tailored = TailoredSource::new(vocabulary, index);
        let diversified = DiversifiedSource::new(catalog.clone());

        Ok(Self {
            catalog,
            users,
            tailored,
            diversified,
            scorer: Scorer::new(),
        })
    }

    /// Generate recommendations for one request.
    ///
    /// The result concatenates the tailored slice before the diversified
    /// slice and keeps that order; when an item qualifies for both pools the
    /// tailored occurrence wins. A short pool is NOT backfilled from the
    /// other, so fewer than `n_recommendations` rows may come back.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<Recommendation>> {
        request.validate()?;

        let profile = self
            .users
            .get(&request.user_id)
            .ok_or_else(|| RecommendError::UserNotFound {
                user_id: request.user_id.clone(),
            })?;

        let filters = FilterPipeline::new()
            .add_filter(FavoriteExclusionFilter::new(self.catalog.clone()))
            .add_filter(MinimumRatingFilter::new(
                self.catalog.clone(),
                request.min_rating,
            ));

        let tailored_pool = filters.apply(self.tailored.get_candidates(profile, RETRIEVAL_DEPTH), profile)?;
        let tailored_pool = self.score_pool(tailored_pool, profile);

        let diversified_pool = filters.apply(self.diversified.get_candidates(profile), profile)?;
        let diversified_pool = self.score_pool(diversified_pool, profile);

        let num_diverse =
            (request.n_recommendations as f32 * request.diversified_ratio).floor() as usize;
        let num_tailored = request.n_recommendations - num_diverse;
        debug!(
            tailored = tailored_pool.len(),
            diversified = diversified_pool.len(),
            num_tailored,
            num_diverse,
            "merging pools"
        );

        let mut seen: HashSet<&str> = HashSet::with_capacity(request.n_recommendations);
        let mut rows = Vec::with_capacity(request.n_recommendations);
        for scored in tailored_pool
            .iter()
            .take(num_tailored)
            .chain(diversified_pool.iter().take(num_diverse))
        {
            let movie = &self.catalog.movies()[scored.item_index];
            if seen.insert(movie.id.as_str()) {
                rows.push(Recommendation {
                    user_id: request.user_id.clone(),
                    item_id: movie.id.clone(),
                    title: movie.title.clone(),
                    genres: movie.genres.clone(),
                    runtime_minutes: movie.runtime_minutes,
                    average_rating: movie.average_rating,
                    total_score: scored.total_score,
                });
            }
        }

        info!(
            user_id = %request.user_id,
            returned = rows.len(),
            "recommendation request served"
        );
        Ok(rows)
    }

    /// Evaluate many requests in parallel, preserving input order.
    ///
    /// Requests are independent pure computations over immutable data, so
    /// they parallelize without coordination.
    pub fn recommend_many(
        &self,
        requests: &[RecommendationRequest],
    ) -> Vec<Result<Vec<Recommendation>>> {
        requests
            .par_iter()
            .map(|request| self.recommend(request))
            .collect()
    }

    /// Score a filtered pool and rank it by total score, descending.
    ///
    /// The sort is stable: equal totals keep their retrieval order, which
    /// makes repeated identical requests bit-identical.
    fn score_pool(
        &self,
        candidates: Vec<retrieval::Candidate>,
        profile: &UserProfile,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                self.catalog
                    .movie(candidate.item_index)
                    .map(|movie| self.scorer.score(candidate, movie, profile.average_watch_time))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
        });
        scored
    }
}
