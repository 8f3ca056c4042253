//! The event venue a place search is anchored on

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Name used when the caller supplies none
pub const DEFAULT_EVENT_NAME: &str = "Event Location";

/// Anchor point of an aggregation, typically a ticketed venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLocation {
    /// Venue or event name
    pub name: String,
    /// Venue coordinates
    pub location: GeoLocation,
    /// Street address, may be empty
    #[serde(default)]
    pub address: String,
    /// Upstream venue identifier, may be empty
    #[serde(default)]
    pub venue_id: String,
}

impl EventLocation {
    /// Create an event location with validated coordinates
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` for out-of-range coordinates.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: name.into(),
            location: GeoLocation::new(latitude, longitude)?,
            address: String::new(),
            venue_id: String::new(),
        })
    }

    /// Set the street address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the upstream venue id
    #[must_use]
    pub fn with_venue_id(mut self, venue_id: impl Into<String>) -> Self {
        self.venue_id = venue_id.into();
        self
    }

    /// Latitude shortcut
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.latitude()
    }

    /// Longitude shortcut
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.longitude()
    }
}
