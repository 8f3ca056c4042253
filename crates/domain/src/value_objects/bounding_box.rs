//! Approximate bounding box around a search center

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude, rounded
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Rectangular lat/lon envelope around a search radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern edge (latitude)
    pub north: f64,
    /// Southern edge (latitude)
    pub south: f64,
    /// Eastern edge (longitude)
    pub east: f64,
    /// Western edge (longitude)
    pub west: f64,
}

impl BoundingBox {
    /// Derive the envelope for a center point and radius in meters.
    ///
    /// The longitude offset is the latitude offset divided by `|lat / 90|`,
    /// except at exactly 0° where it stays unscaled. This is a rough
    /// approximation kept for output compatibility: it is not geodesic and
    /// grows without bound as the latitude approaches (but is not) zero.
    #[must_use]
    pub fn around(center_lat: f64, center_lon: f64, radius_meters: u32) -> Self {
        let lat_offset = f64::from(radius_meters) / METERS_PER_DEGREE;
        #[allow(clippy::float_cmp)]
        let lon_offset = if center_lat == 0.0 {
            lat_offset
        } else {
            lat_offset / (center_lat / 90.0).abs()
        };

        Self {
            north: center_lat + lat_offset,
            south: center_lat - lat_offset,
            east: center_lon + lon_offset,
            west: center_lon - lon_offset,
        }
    }
}
