//! Coordinate model and great-circle distance

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and inside WGS84 bounds
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.lat,
                longitude: self.lng,
            },
            haversine::Location {
                latitude: other.lat,
                longitude: other.lng,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Format coordinates as a display string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// A location as written in a listing document.
///
/// Documents are not trusted to carry both components, or numbers at all, so
/// any JSON value decodes here and missing or non-numeric parts become `None`.
/// The ranker decides what to do with an incomplete location.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(from = "serde_json::Value")]
pub struct ListingLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl ListingLocation {
    /// Both components, when present
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }
}

impl From<Coordinates> for ListingLocation {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            lat: Some(coordinates.lat),
            lng: Some(coordinates.lng),
        }
    }
}

impl From<serde_json::Value> for ListingLocation {
    fn from(value: serde_json::Value) -> Self {
        Self {
            lat: value.get("lat").and_then(serde_json::Value::as_f64),
            lng: value.get("lng").and_then(serde_json::Value::as_f64),
        }
    }
}
