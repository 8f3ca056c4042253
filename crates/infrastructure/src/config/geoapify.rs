//! Geoapify connection settings

use integration_geoapify::GeoapifyConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Geoapify settings as loaded from file and environment
#[derive(Clone, Serialize, Deserialize)]
pub struct GeoapifyAppConfig {
    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL, without the `/v2/places` path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeoapifyAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoapifyAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    GeoapifyConfig::default().base_url
}

fn default_timeout_secs() -> u64 {
    GeoapifyConfig::default().timeout_secs
}

impl Default for GeoapifyAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeoapifyAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_geoapify`'s `GeoapifyConfig`
    #[must_use]
    pub fn to_geoapify_config(&self) -> GeoapifyConfig {
        GeoapifyConfig {
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Validate the settings
    ///
    /// A missing key is not an error here; searches then degrade to empty
    /// results and the client logs the failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("geoapify.base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("geoapify.timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
