//! Geoapify Places integration for CityPulse
//!
//! Searches points of interest around a coordinate via the
//! [Geoapify Places API](https://apidocs.geoapify.com/docs/places/) and turns the
//! raw GeoJSON-like response into normalized [`domain::PlaceResult`] records.
//!
//! # Architecture
//!
//! [`PlaceSearchClient`] defines the interface, implemented by [`GeoapifyClient`].
//! The strict [`PlaceSearchClient::fetch_places`] reports typed errors, while
//! [`PlaceSearchClient::search`] degrades any failure to an empty response.
//! [`normalize_response`] converts a raw response into places sorted by distance.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geoapify::{GeoapifyClient, GeoapifyConfig, PlaceSearchClient, PlaceSearchRequest};
//!
//! let client = GeoapifyClient::new(&GeoapifyConfig::with_api_key("key"))?;
//! let request = PlaceSearchRequest::new(40.7505, -73.9934, &["catering.restaurant"], 1000, 10);
//! let places = integration_geoapify::normalize_response(&client.search(&request).await);
//! ```

mod client;
mod config;
mod error;
mod models;
mod normalize;

pub use client::{GeoapifyClient, PlaceSearchClient, PlaceSearchRequest};
pub use config::GeoapifyConfig;
pub use error::GeoapifyError;
pub use models::{RawFeature, RawGeometry, RawPlacesResponse};
pub use normalize::{extract_rating, normalize_response};
