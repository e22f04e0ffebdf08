//! Listing filtering and distance ranking
//!
//! Takes the loaded listings plus the three user-driven inputs (center,
//! query, optional radius) and produces the visible, nearest-first results.

use serde::Serialize;
use tracing::debug;

use crate::error::FinderError;
use crate::models::{Coordinates, Listing, RankedListing};
use crate::Result;

/// A listing that matched but could not be ranked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidListing {
    pub id: String,
    pub reason: String,
}

impl From<InvalidListing> for FinderError {
    fn from(invalid: InvalidListing) -> Self {
        FinderError::invalid_listing(invalid.id, invalid.reason)
    }
}

/// Outcome of a ranking call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    /// Visible listings, nearest first
    pub results: Vec<RankedListing>,
    /// Approved, matching listings left out because of unusable geodata
    pub skipped: Vec<InvalidListing>,
}

/// Filters and ranks listings by distance from a center point
pub struct ListingRanker;

impl ListingRanker {
    /// Rank `listings` around `center`.
    ///
    /// Unapproved listings are always dropped. A listing passes the text
    /// filter when `query` is empty or its lowercase form is contained in
    /// the name, the space-joined services or the address. When `radius_km`
    /// is given, listings farther away than it are dropped (a listing
    /// exactly at the radius is kept). Results are sorted by distance, ties
    /// keep input order.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Validation`] when `center` is not a valid
    /// coordinate or `radius_km` is not a positive finite number. Listings
    /// with missing or invalid locations never fail the call; they are
    /// reported in [`Ranking::skipped`].
    pub fn rank(
        listings: &[Listing],
        center: &Coordinates,
        query: &str,
        radius_km: Option<f64>,
    ) -> Result<Ranking> {
        if !center.is_valid() {
            return Err(FinderError::validation(format!(
                "center ({}, {}) is not a valid coordinate",
                center.lat, center.lng
            )));
        }
        if let Some(radius) = radius_km {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(FinderError::validation(format!(
                    "radius must be a positive number of kilometers, got {radius}"
                )));
            }
        }

        let query = query.to_lowercase();
        let mut ranking = Ranking::default();

        for listing in listings
            .iter()
            .filter(|listing| listing.approved)
            .filter(|listing| Self::matches_lowercase_query(listing, &query))
        {
            let location = match Self::usable_location(listing) {
                Ok(location) => location,
                Err(invalid) => {
                    ranking.skipped.push(invalid);
                    continue;
                }
            };

            let distance_km = location.distance_km(center);
            if radius_km.is_some_and(|radius| distance_km > radius) {
                continue;
            }

            ranking.results.push(RankedListing {
                listing: listing.clone(),
                distance_km,
            });
        }

        // sort_by is stable, equal distances keep input order
        ranking
            .results
            .sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        debug!(
            "Ranked {} of {} listings ({} skipped) around {}",
            ranking.results.len(),
            listings.len(),
            ranking.skipped.len(),
            center.format_coordinates()
        );

        Ok(ranking)
    }

    /// Check whether `listing` matches a free-text query, ignoring case
    #[must_use]
    pub fn matches_query(listing: &Listing, query: &str) -> bool {
        Self::matches_lowercase_query(listing, &query.to_lowercase())
    }

    fn matches_lowercase_query(listing: &Listing, query: &str) -> bool {
        query.is_empty()
            || listing.name.to_lowercase().contains(query)
            || listing.services_text().to_lowercase().contains(query)
            || listing.address.to_lowercase().contains(query)
    }

    fn usable_location(listing: &Listing) -> std::result::Result<Coordinates, InvalidListing> {
        let Some(location) = listing.location else {
            return Err(InvalidListing {
                id: listing.id.clone(),
                reason: "missing location".to_string(),
            });
        };

        match location.coordinates() {
            Some(coordinates) if coordinates.is_valid() => Ok(coordinates),
            Some(coordinates) => Err(InvalidListing {
                id: listing.id.clone(),
                reason: format!(
                    "location ({}, {}) is out of range",
                    coordinates.lat, coordinates.lng
                ),
            }),
            None => Err(InvalidListing {
                id: listing.id.clone(),
                reason: "location needs numeric lat and lng".to_string(),
            }),
        }
    }
}
