//! Contact links built from a listing's passthrough fields

use serde::Serialize;

use crate::models::{Coordinates, Listing};

/// Links a view can offer for reaching or locating a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactLinks {
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub maps: Option<String>,
}

impl ContactLinks {
    #[must_use]
    pub fn for_listing(listing: &Listing) -> Self {
        Self {
            phone: listing.phone.as_deref().and_then(phone_link),
            whatsapp: listing.contact_handle.as_deref().and_then(whatsapp_link),
            maps: listing.coordinates().as_ref().map(maps_link),
        }
    }
}

/// `tel:` link for a phone number, `None` when blank
#[must_use]
pub fn phone_link(phone: &str) -> Option<String> {
    let phone = phone.trim();
    (!phone.is_empty()).then(|| format!("tel:{phone}"))
}

/// WhatsApp click-to-chat link; everything except digits is stripped
#[must_use]
pub fn whatsapp_link(handle: &str) -> Option<String> {
    let digits: String = handle.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
}

/// Google Maps link pointing at a coordinate
#[must_use]
pub fn maps_link(location: &Coordinates) -> String {
    format!(
        "https://www.google.com/maps?q={},{}",
        location.lat, location.lng
    )
}
