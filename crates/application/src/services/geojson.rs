//! GeoJSON document model
//!
//! Output shapes of an aggregation: one event marker followed by place
//! markers, plus aggregate properties for the map view.

use std::collections::BTreeMap;

use domain::{BoundingBox, EventLocation, MarkerSize, MarkerStyle, PlaceResult};
use serde::Serialize;
use serde_json::Value;

/// Feature id of the event marker
pub const EVENT_FEATURE_ID: &str = "event_location";

/// A GeoJSON point; coordinates are `[lon, lat]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    /// Longitude first
    pub coordinates: [f64; 2],
}

/// One map marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Marker position
    pub geometry: PointGeometry,
    /// Marker metadata
    pub properties: FeatureProperties,
}

impl Feature {
    /// The event marker: red star, large
    #[must_use]
    pub fn event(event: &EventLocation) -> Self {
        let style = MarkerStyle::EVENT;
        Self {
            geometry: PointGeometry {
                coordinates: event.location.to_lon_lat(),
            },
            properties: FeatureProperties::Event(EventProperties {
                id: EVENT_FEATURE_ID.to_string(),
                name: event.name.clone(),
                address: event.address.clone(),
                kind: "event".to_string(),
                category: "event".to_string(),
                marker_color: style.color.to_string(),
                marker_icon: style.icon.to_string(),
                marker_size: style.size,
            }),
        }
    }

    /// A place marker styled from its category
    #[must_use]
    pub fn place(place: &PlaceResult) -> Self {
        let style = place.marker_style();
        Self {
            geometry: PointGeometry {
                coordinates: place.location.to_lon_lat(),
            },
            properties: FeatureProperties::Place(PlaceProperties {
                id: place.display_id(),
                name: place.name.clone(),
                category: place.category.clone(),
                subcategory: place.subcategory.clone(),
                address: place.address.clone(),
                distance: place.distance,
                rating: place.rating,
                phone: place.phone.clone(),
                website: place.website.clone(),
                opening_hours: place.opening_hours.clone(),
                description: place.description.clone(),
                marker_color: style.color.to_string(),
                marker_icon: style.icon.to_string(),
                marker_size: style.size,
            }),
        }
    }

    /// Whether this is the event marker
    #[must_use]
    pub const fn is_event(&self) -> bool {
        matches!(self.properties, FeatureProperties::Event(_))
    }
}

/// Either marker shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureProperties {
    /// The originating event
    Event(EventProperties),
    /// A nearby place
    Place(PlaceProperties),
}

/// Properties of the event marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventProperties {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Always `"event"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `"event"`
    pub category: String,
    pub marker_color: String,
    pub marker_icon: String,
    pub marker_size: MarkerSize,
}

/// Properties of a place marker; absent values serialize as `null`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceProperties {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub address: String,
    /// Meters from the event
    pub distance: u32,
    pub rating: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<Value>,
    pub description: Option<String>,
    pub marker_color: String,
    pub marker_icon: String,
    pub marker_size: MarkerSize,
}

/// Aggregate properties of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionProperties {
    /// Event position, `[lon, lat]`
    pub center: [f64; 2],
    /// Search radius in meters
    pub radius: u32,
    /// Places found per requested search type
    pub categories: BTreeMap<String, usize>,
    /// Approximate envelope of the search radius
    pub bounds: BoundingBox,
    /// Number of place features, excluding the event marker
    #[serde(rename = "totalPlaces")]
    pub total_places: usize,
}

/// The assembled document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Event marker first, then places
    pub features: Vec<Feature>,
    /// Aggregate properties
    pub properties: CollectionProperties,
}

impl FeatureCollection {
    /// Place features only
    pub fn places(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| !f.is_event())
    }

    /// Serialize as a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
