//! Raw Geoapify response structures
//!
//! Provider records are heterogeneous, so feature properties are kept as a
//! JSON map and interpreted field by field during normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw response of the places endpoint (`format=geojson`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlacesResponse {
    /// Returned features, empty when the search degraded
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

impl RawPlacesResponse {
    /// The `{features: []}` response used when a search fails
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Whether the response carries no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// One raw provider feature
///
/// Deserializes from any JSON value: fields with an unexpected shape are
/// dropped, so one malformed record never fails the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawFeature {
    /// Provider properties (`place_id`, `name`, `categories`, ...)
    pub properties: Option<Map<String, Value>>,

    /// Feature geometry
    pub geometry: Option<RawGeometry>,
}

impl From<Value> for RawFeature {
    fn from(value: Value) -> Self {
        let Value::Object(mut feature) = value else {
            return Self::default();
        };
        let properties = match feature.remove("properties") {
            Some(Value::Object(props)) => Some(props),
            _ => None,
        };
        Self {
            properties,
            geometry: feature.remove("geometry").and_then(RawGeometry::from_value),
        }
    }
}

/// Raw feature geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawGeometry {
    /// `[lon, lat]` for points
    pub coordinates: Option<Vec<Value>>,
}

impl RawGeometry {
    fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut geometry) = value else {
            return None;
        };
        let coordinates = match geometry.remove("coordinates") {
            Some(Value::Array(coords)) => Some(coords),
            _ => None,
        };
        Some(Self { coordinates })
    }
}
