//! Normalized point of interest returned by a place search

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{GeoLocation, MarkerStyle};

/// A place near the event, normalized from a provider record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Provider place id; `None` when the provider did not send one
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Primary provider category code
    pub category: String,
    /// Secondary category code (equals `category` when only one was given)
    pub subcategory: String,
    /// Place coordinates
    pub location: GeoLocation,
    /// Formatted address
    pub address: String,
    /// Distance from the search center in meters
    pub distance: u32,
    /// Rating, if any source provided a numeric one
    pub rating: Option<f64>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Provider opening hours, passed through untouched
    pub opening_hours: Option<Value>,
    /// Free-form description
    pub description: Option<String>,
}

impl PlaceResult {
    /// Identifier used when rendering this place.
    ///
    /// Falls back to `"<lat>_<lon>"` when the provider sent no id. The
    /// fallback is not unique for places sharing exact coordinates.
    #[must_use]
    pub fn display_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            format!(
                "{}_{}",
                self.location.latitude(),
                self.location.longitude()
            )
        })
    }

    /// Marker styling derived from the primary category
    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle::for_category(&self.category)
    }
}

/// Sort places by ascending distance, keeping input order for ties
pub fn sort_by_distance(places: &mut [PlaceResult]) {
    places.sort_by_key(|place| place.distance);
}
