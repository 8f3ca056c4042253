//! Application configuration
//!
//! Split into focused sub-modules:
//! - `geoapify`: places API connection settings
//! - `search`: aggregation defaults
//!
//! Telemetry settings live in [`crate::telemetry`].

mod geoapify;
mod search;

use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use geoapify::GeoapifyAppConfig;
pub use search::SearchConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment overrides, e.g. `CITYPULSE_GEOAPIFY__API_KEY`
pub const ENV_PREFIX: &str = "CITYPULSE";

/// Environment variable accepted for the API key when none is configured
pub const LEGACY_API_KEY_VAR: &str = "GEOAPIFY_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geoapify connection settings
    #[serde(default)]
    pub geoapify: GeoapifyAppConfig,

    /// Aggregation defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// Layers, lowest first: built-in defaults, `config.toml` in the working
    /// directory, `CITYPULSE_*` variables (`__` separates sections), then
    /// `GEOAPIFY_API_KEY` if no key was configured.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("config").required(false))
    }

    /// Like [`AppConfig::load`] but reading an explicit, required file
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path).required(true))
    }

    fn load_with<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("search.radius_meters", 1000)?
            .set_default("search.limit_per_category", 10)?
            .set_default("telemetry.log_filter", "info")?
            .add_source(file)
            // Override with environment variables (e.g., CITYPULSE_SEARCH__RADIUS_METERS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search.search_types"),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_api_key(std::env::var(LEGACY_API_KEY_VAR).ok());
        Ok(config)
    }

    /// Use `key` as the API key unless one is already configured
    pub fn apply_legacy_api_key(&mut self, key: Option<String>) {
        if self.geoapify.has_api_key() {
            return;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            debug!("Using Geoapify API key from {LEGACY_API_KEY_VAR}");
            self.geoapify.api_key = Some(SecretString::from(key));
        }
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), String> {
        self.geoapify.validate()?;
        self.search.validate()?;
        self.telemetry.validate()
    }

    /// Configuration suitable for tests against a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            geoapify: GeoapifyAppConfig {
                api_key: Some(SecretString::from("test-key".to_string())),
                base_url: base_url.into(),
                timeout_secs: 5,
            },
            ..Default::default()
        }
    }
}
