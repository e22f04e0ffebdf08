//! Data models for the nearby finder
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and distance
//! - Listing: Listing records and ranked results

pub mod listing;
pub mod location;

// Re-export all public types for convenient access
pub use listing::{Listing, RankedListing};
pub use location::{Coordinates, ListingLocation};
