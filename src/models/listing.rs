//! Listing records as they appear in the listing document

use serde::{Deserialize, Serialize};

use super::{Coordinates, ListingLocation};

/// A single business/service listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    /// Moderation flag, only approved listings are ever shown
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(
        rename = "loc",
        alias = "location",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<ListingLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// WhatsApp or similar messaging handle
    #[serde(
        rename = "whats",
        alias = "contactHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_handle: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Listing {
    /// Services joined with single spaces, as used for text matching
    #[must_use]
    pub fn services_text(&self) -> String {
        self.services.join(" ")
    }

    /// The listing's coordinates when its location has both components
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(ListingLocation::coordinates)
    }
}

/// A listing that survived ranking, with its distance from the center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub distance_km: f64,
}
