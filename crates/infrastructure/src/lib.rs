//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and carries the
//! process-wide concerns: configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeoapifyAppConfig, SearchConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
