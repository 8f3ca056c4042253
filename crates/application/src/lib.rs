//! Application layer - Use cases and orchestration
//!
//! Defines the place search port, normalizes caller location input and
//! assembles nearby places into a GeoJSON document for map rendering.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
