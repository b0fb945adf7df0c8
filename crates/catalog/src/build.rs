//! Catalog and user-store construction.
//!
//! Preprocessing happens here, once per load:
//! - rows without genres are dropped (they cannot be encoded);
//! - rows carrying an excluded genre are dropped;
//! - missing runtimes are imputed with the catalog median;
//! - duplicate ids keep the first occurrence;
//! - rating ranges are validated.
//!
//! After `build` the catalog is immutable for the life of the process.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;

/// Build-time options for catalog preprocessing.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Items carrying any of these genre labels are dropped from the catalog
    pub excluded_genres: Vec<String>,
}

impl CatalogOptions {
    pub fn with_excluded_genres(genres: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded_genres: genres.into_iter().collect(),
        }
    }
}

impl Catalog {
    /// Load and preprocess the catalog from a CSV file
    pub fn load_from_file(path: &Path, options: &CatalogOptions) -> Result<Self> {
        let records = parser::parse_catalog(path)?;
        Self::build(records, options)
    }

    /// Build the catalog from raw records
    pub fn build(records: Vec<CatalogRecord>, options: &CatalogOptions) -> Result<Self> {
        let median = median_runtime(&records);

        let mut movies = Vec::with_capacity(records.len());
        let mut id_index = HashMap::with_capacity(records.len());

        for record in records {
            if record.genres.is_empty() {
                continue;
            }
            if record
                .genres
                .iter()
                .any(|g| options.excluded_genres.iter().any(|x| x == g))
            {
                continue;
            }
            if id_index.contains_key(&record.id) {
                // Duplicate id: first occurrence wins
                continue;
            }

            if let Some(rating) = record.average_rating
                && !(0.0..=10.0).contains(&rating)
            {
                return Err(CatalogError::InvalidValue {
                    field: "averageRating".to_string(),
                    value: rating.to_string(),
                });
            }

            id_index.insert(record.id.clone(), movies.len());
            movies.push(Movie {
                id: record.id,
                title: record.title,
                genres: record.genres,
                runtime_minutes: record.runtime_minutes.unwrap_or(median),
                average_rating: record.average_rating,
            });
        }

        Ok(Self {
            movies,
            id_index,
            median_runtime: median,
        })
    }
}

/// Median of the runtimes that are present (0 when none are).
///
/// Computed over ALL records, before any row is dropped, so the imputed value
/// matches what the source data actually contains.
fn median_runtime(records: &[CatalogRecord]) -> u32 {
    let mut runtimes: Vec<u32> = records
        .iter()
        .filter_map(|r| r.runtime_minutes)
        .collect();
    if runtimes.is_empty() {
        return 0;
    }
    runtimes.sort_unstable();
    runtimes[runtimes.len() / 2]
}

impl UserStore {
    /// Load user profiles from a CSV file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Ok(Self::from_profiles(parser::parse_users(path)?))
    }

    /// Build a store from already-validated profiles
    pub fn from_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let mut store = Self::new();
        for profile in profiles {
            store.insert(profile);
        }
        store
    }
}
