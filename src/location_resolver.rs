//! Location Resolution Module
//!
//! This module turns user-supplied location text into the search center.
//! Detection of the user's position happens outside this crate; a detected
//! position arrives here as plain `lat,lng` text.

use crate::error::FinderError;
use crate::models::Coordinates;
use crate::Result;
use tracing::{debug, warn};

/// Parsed location input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationInput {
    Coordinates(f64, f64),
}

impl LocationInput {
    /// Parse `"lat,lng"` text
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(FinderError::validation(format!(
                "expected 'lat,lng', got '{input}'"
            )));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| FinderError::validation(format!("invalid latitude '{}'", parts[0])))?;
        let lng: f64 = parts[1]
            .parse()
            .map_err(|_| FinderError::validation(format!("invalid longitude '{}'", parts[1])))?;

        if !Coordinates::new(lat, lng).is_valid() {
            return Err(FinderError::validation(format!(
                "coordinates ({lat}, {lng}) are out of range"
            )));
        }

        Ok(Self::Coordinates(lat, lng))
    }
}

impl From<LocationInput> for Coordinates {
    fn from(input: LocationInput) -> Self {
        match input {
            LocationInput::Coordinates(lat, lng) => Coordinates::new(lat, lng),
        }
    }
}

/// Service for resolving the search center
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve optional location text into a center.
    ///
    /// Missing or unusable input leaves `default_center` in place.
    #[must_use]
    pub fn resolve(input: Option<&str>, default_center: Coordinates) -> Coordinates {
        let Some(input) = input else {
            debug!(
                "No location given, using default center {}",
                default_center.format_coordinates()
            );
            return default_center;
        };

        match LocationInput::parse(input) {
            Ok(location) => {
                let center = Coordinates::from(location);
                debug!("Resolved center: {}", center.format_coordinates());
                center
            }
            Err(e) => {
                warn!(
                    "{}. Using default center {}",
                    e,
                    default_center.format_coordinates()
                );
                default_center
            }
        }
    }
}
