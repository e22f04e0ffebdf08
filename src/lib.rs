//! Nearby finder - approved service listings ranked by distance
//!
//! This library provides the listing ranker together with the pieces that
//! feed it: listing sources, center resolution, configuration and the
//! HTTP API used as a view-layer controller.

pub mod api;
pub mod config;
pub mod error;
pub mod listings;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use config::FinderConfig;
pub use error::FinderError;
pub use listings::{InvalidListing, ListingLoader, ListingRanker, Ranking};
pub use location_resolver::{LocationInput, LocationResolver};
pub use models::{Coordinates, Listing, ListingLocation, RankedListing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FinderError>;
