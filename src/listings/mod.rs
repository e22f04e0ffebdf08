//! Listings module
//!
//! This module provides the listing functionality:
//! - Filtering and distance ranking of listings around a center
//! - Listing sources (bundled, file, remote document) and the loader
//! - Contact links for the passthrough fields
//! - The disclaimer shown alongside results

pub mod contact;
pub mod disclaimer;
pub mod loader;
pub mod ranker;
pub mod source;

// Re-export commonly used types from submodules
pub use contact::{ContactLinks, maps_link, phone_link, whatsapp_link};
pub use disclaimer::{DISCLAIMER_BODY, DISCLAIMER_TITLE};
pub use loader::ListingLoader;
pub use ranker::{InvalidListing, ListingRanker, Ranking};
pub use source::{
    BundledListings, FileListingSource, ListingSource, RemoteListingSource,
    parse_listing_document,
};
