//! Domain layer for CityPulse
//!
//! Contains the place-aggregation vocabulary: event anchors, normalized places,
//! provider category codes, marker styling and bounding boxes.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
