//! Listing sources
//!
//! A source yields the full listing set for a session. The bundled set is
//! always available; file and remote sources read a JSON array document of
//! the same shape.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::FinderError;
use crate::models::Listing;
use crate::Result;

/// Listing document compiled into the binary
const BUNDLED_LISTINGS: &str = include_str!("../../data/listings.json");

// Sources are driven from a single task, so callers do not need a Send bound
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    /// Fetch every listing this source knows about
    async fn fetch_listings(&self) -> Result<Vec<Listing>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Parse a listing document, which must be a JSON array of listings
pub fn parse_listing_document(text: &str) -> Result<Vec<Listing>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| FinderError::parse(format!("listing document is not JSON: {e}")))?;

    if !value.is_array() {
        return Err(FinderError::parse(
            "listing document must be a JSON array of listings",
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| FinderError::parse(format!("invalid listing in document: {e}")))
}

/// The default demo listings shipped with the application
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledListings;

impl BundledListings {
    /// Decode the bundled document
    pub fn listings() -> Result<Vec<Listing>> {
        parse_listing_document(BUNDLED_LISTINGS)
    }
}

impl ListingSource for BundledListings {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        Self::listings()
    }

    fn describe(&self) -> String {
        "bundled listings".to_string()
    }
}

/// Listings read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileListingSource {
    path: PathBuf,
}

impl FileListingSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<Listing>> {
        if !self.path.exists() {
            return Err(FinderError::listing_source(format!(
                "listing file not found: {}",
                self.path.display()
            )));
        }

        debug!("Reading listings from {}", self.path.display());
        let text = fs::read_to_string(&self.path)?;
        parse_listing_document(&text)
    }
}

impl ListingSource for FileListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        self.load()
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Listings fetched from a remote JSON document
#[derive(Debug, Clone)]
pub struct RemoteListingSource {
    client: Client,
    url: String,
}

impl RemoteListingSource {
    /// Create a new remote source with a request timeout
    pub fn new<S: Into<String>>(url: S, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nearby-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinderError::listing_source(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl ListingSource for RemoteListingSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        info!("Fetching listings from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FinderError::listing_source(format!("request to {} failed: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(FinderError::listing_source(format!(
                "{} answered with status {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FinderError::listing_source(format!("failed to read response body: {e}")))?;

        parse_listing_document(&body)
    }

    fn describe(&self) -> String {
        format!("remote document {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONE_LISTING: &str = r#"[{
        "id": "remote-spa",
        "name": "Remote Spa",
        "approved": true,
        "services": ["Shiatsu"],
        "address": "1 Orchard Road",
        "loc": { "lat": 1.30, "lng": 103.83 }
    }]"#;

    #[test]
    fn test_bundled_listings_decode() {
        let listings = BundledListings::listings().unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Yi Spa", "Moonlight", "Nice Wellness"]);
        assert!(!listings[2].approved);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let result = parse_listing_document(r#"{"listings": []}"#);
        assert!(matches!(result, Err(FinderError::Parse { .. })));

        let result = parse_listing_document("not json");
        assert!(matches!(result, Err(FinderError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_malformed_entry() {
        let result = parse_listing_document(r#"[{"id": "no-name"}]"#);
        assert!(matches!(result, Err(FinderError::Parse { .. })));
    }

    #[test]
    fn test_parse_keeps_listing_with_incomplete_location() {
        let listings = parse_listing_document(
            r#"[
                {"id": "whole", "name": "Whole", "loc": {"lat": 1.30, "lng": 103.83}},
                {"id": "half", "name": "Half", "loc": {"lat": 1.31}}
            ]"#,
        )
        .unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings[0].coordinates().is_some());
        assert!(listings[1].location.is_some());
        assert!(listings[1].coordinates().is_none());
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(ONE_LISTING.as_bytes()).unwrap();

        let source = FileListingSource::new(temp_file.path());
        let listings = source.fetch_listings().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "remote-spa");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileListingSource::new("nonexistent_listings.json");
        let result = source.fetch_listings().await;
        assert!(matches!(result, Err(FinderError::Source { .. })));
    }

    #[tokio::test]
    async fn test_remote_source_fetches_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/listings.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ONE_LISTING))
            .mount(&server)
            .await;

        let source = RemoteListingSource::new(
            format!("{}/listings.json", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        let listings = source.fetch_listings().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "Remote Spa");
    }

    #[tokio::test]
    async fn test_remote_source_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/listings.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = RemoteListingSource::new(
            format!("{}/listings.json", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        let result = source.fetch_listings().await;
        assert!(matches!(result, Err(FinderError::Source { .. })));
    }
}
