//! Tracing subscriber setup
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
