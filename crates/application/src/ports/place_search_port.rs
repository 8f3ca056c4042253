//! Place search port
//!
//! Defines the interface for finding places of interest around a point.

use async_trait::async_trait;
use domain::{GeoLocation, PlaceResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// One category search around a center point
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    /// Search center
    pub center: GeoLocation,
    /// Provider category codes, as resolved from a search-type tag
    pub categories: Vec<String>,
    /// Search radius in meters
    pub radius_meters: u32,
    /// Maximum number of places to return
    pub limit: u32,
}

impl PlaceQuery {
    /// Create a query for the given provider category codes
    #[must_use]
    pub fn new(center: GeoLocation, categories: &[&str], radius_meters: u32, limit: u32) -> Self {
        Self {
            center,
            categories: categories.iter().map(ToString::to_string).collect(),
            radius_meters,
            limit,
        }
    }
}

/// Port for place search services
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Find places matching the query, sorted by ascending distance
    async fn search_places(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceResult>, ApplicationError>;

    /// Check if the place search service is available
    async fn is_available(&self) -> bool;
}
