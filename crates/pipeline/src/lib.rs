//! Pipeline for filtering and scoring of retrieved candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Scorer for computing composite candidate scores
//!
//! ## Architecture
//! The pipeline processes each retrieval pool in stages:
//! 1. Filters remove unwanted candidates (favorites, low-rated items)
//! 2. The Scorer turns surviving candidates into scored rows
//! 3. The engine ranks, merges and truncates the scored pools
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, Scorer};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(FavoriteExclusionFilter::new(catalog.clone()))
//!     .add_filter(MinimumRatingFilter::new(catalog.clone(), 7.0));
//!
//! let filtered = pipeline.apply(candidates, &profile)?;
//!
//! let scorer = Scorer::new();
//! let scored: Vec<_> = filtered
//!     .iter()
//!     .map(|c| scorer.score(c, &catalog.movies()[c.item_index], profile.average_watch_time))
//!     .collect();
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod scorer;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use scorer::{ScoredCandidate, Scorer};
pub use traits::Filter;
