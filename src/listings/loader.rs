//! Listing Loading Module
//!
//! Picks the configured listing source and falls back to the bundled
//! listings whenever that source fails, so callers always get a usable set.

use tracing::{debug, error, info, warn};

use crate::config::ListingsConfig;
use crate::listings::source::{
    BundledListings, FileListingSource, ListingSource, RemoteListingSource,
};
use crate::models::Listing;

/// Service for loading the session's listing set
pub struct ListingLoader;

impl ListingLoader {
    /// Load listings from the configured source.
    ///
    /// A remote URL takes precedence over a file. Any failure is logged and
    /// replaced by the bundled listings.
    pub async fn load(config: &ListingsConfig) -> Vec<Listing> {
        if let Some(url) = &config.url {
            match RemoteListingSource::new(url.clone(), config.timeout()) {
                Ok(source) => return Self::load_or_bundled(&source).await,
                Err(e) => {
                    warn!("Cannot use remote listing source {}: {}", url, e);
                    return Self::bundled();
                }
            }
        }

        if let Some(file) = &config.file {
            return Self::load_or_bundled(&FileListingSource::new(file)).await;
        }

        debug!("No listing source configured, using bundled listings");
        Self::bundled()
    }

    /// Load from `source`, falling back to the bundled listings on error
    pub async fn load_or_bundled<S: ListingSource>(source: &S) -> Vec<Listing> {
        match source.fetch_listings().await {
            Ok(listings) => {
                info!(
                    "Loaded {} listings from {}",
                    listings.len(),
                    source.describe()
                );
                listings
            }
            Err(e) => {
                warn!(
                    "Failed to load listings from {}: {}. Using bundled listings",
                    source.describe(),
                    e
                );
                Self::bundled()
            }
        }
    }

    fn bundled() -> Vec<Listing> {
        BundledListings::listings().unwrap_or_else(|e| {
            error!("Bundled listings are unreadable: {}", e);
            Vec::new()
        })
    }
}
