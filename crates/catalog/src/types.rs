//! Core domain types for the movie catalog and user profiles.
//!
//! The catalog is built once per process and is read-only afterwards;
//! user profiles are looked up by id and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a catalog item (e.g. "tt0000123")
pub type ItemId = String;

/// Unique identifier for a user profile (e.g. "user_scifi")
pub type UserId = String;

// =============================================================================
// Catalog Types
// =============================================================================

/// A catalog entry after preprocessing.
///
/// `runtime_minutes` is always concrete here: missing runtimes are imputed
/// with the catalog median at build time. `average_rating` stays `None` when
/// the source had no rating; it is treated as 0 only when scoring/filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: ItemId,
    pub title: String,
    /// Genre labels in source order (non-empty after preprocessing)
    pub genres: Vec<String>,
    pub runtime_minutes: u32,
    /// Average rating in [0, 10], if the source carried one
    pub average_rating: Option<f32>,
}

/// A raw catalog row as parsed from the boundary file, before preprocessing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub id: ItemId,
    pub title: String,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<u32>,
    pub average_rating: Option<f32>,
}

// =============================================================================
// User Types
// =============================================================================

/// A user profile consumed by the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    /// Preferred genre labels in source order (non-empty; labels need not
    /// exist in the catalog vocabulary)
    pub preferred_genres: Vec<String>,
    /// Average watch time in minutes (positive)
    pub average_watch_time: u32,
    /// Item ids excluded from every recommendation pool for this user
    pub favorite_movies: HashSet<ItemId>,
}

// =============================================================================
// Catalog - The In-Memory Item Store
// =============================================================================

/// All preprocessed catalog items plus an id lookup index.
///
/// Items keep their source order; positional indices returned by the
/// similarity layer refer to `movies()` slots.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) id_index: HashMap<ItemId, usize>,
    /// Median runtime used to impute missing runtimes at build time
    pub(crate) median_runtime: u32,
}

impl Catalog {
    /// All items in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Item at a positional index
    pub fn movie(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Item by id
    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.id_index.get(id).map(|&i| &self.movies[i])
    }

    /// Positional index of an item id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.id_index.get(id).copied()
    }

    /// Runtime value that was used to fill missing runtimes
    pub fn median_runtime(&self) -> u32 {
        self.median_runtime
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

// =============================================================================
// UserStore
// =============================================================================

/// User profiles keyed by id.
#[derive(Debug, Default)]
pub struct UserStore {
    pub(crate) profiles: HashMap<UserId, UserProfile>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a profile by user id
    pub fn get(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.get(user_id)
    }

    /// Insert a profile (replaces any previous profile with the same id)
    pub fn insert(&mut self, profile: UserProfile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    /// All user ids, sorted for deterministic iteration
    pub fn user_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
