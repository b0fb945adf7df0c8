//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod favorite_exclusion;
pub mod minimum_rating;

// Re-export for convenience
pub use favorite_exclusion::FavoriteExclusionFilter;
pub use minimum_rating::MinimumRatingFilter;
