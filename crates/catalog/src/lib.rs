//! # Catalog Crate
//!
//! This crate handles loading and preprocessing the movie catalog and the
//! user profile store.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, UserProfile, Catalog, UserStore)
//! - **parser**: Parse the boundary CSV files into Rust structs
//! - **build**: Catalog preprocessing (genre exclusions, median imputation)
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, CatalogOptions, UserStore};
//! use std::path::Path;
//!
//! let options = CatalogOptions::default();
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"), &options)?;
//! let users = UserStore::load_from_file(Path::new("data/users.csv"))?;
//!
//! let movie = catalog.get("tt0000001").unwrap();
//! println!("{} runs {} minutes", movie.title, movie.runtime_minutes);
//! ```

// Public modules
pub mod build;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use build::CatalogOptions;
pub use error::{CatalogError, Result};
pub use types::{Catalog, CatalogRecord, ItemId, Movie, UserId, UserProfile, UserStore};
