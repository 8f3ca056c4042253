//! Aggregation defaults

use std::time::Duration;

use application::{AssemblyRequest, DEFAULT_LIMIT_PER_CATEGORY, DEFAULT_RADIUS_METERS};
use domain::DEFAULT_SEARCH_TYPES;
use serde::{Deserialize, Serialize};

/// Default radius, limit and search types of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search radius in meters (default: 1000)
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Places kept per search type (default: 10)
    #[serde(default = "default_limit_per_category")]
    pub limit_per_category: u32,

    /// Search-type tags queried when none are given
    #[serde(default = "default_search_types")]
    pub search_types: Vec<String>,

    /// Deadline for a whole aggregation in seconds (default: none)
    #[serde(default)]
    pub total_timeout_secs: Option<u64>,
}

const fn default_radius_meters() -> u32 {
    DEFAULT_RADIUS_METERS
}

const fn default_limit_per_category() -> u32 {
    DEFAULT_LIMIT_PER_CATEGORY
}

fn default_search_types() -> Vec<String> {
    DEFAULT_SEARCH_TYPES.iter().map(ToString::to_string).collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
            limit_per_category: default_limit_per_category(),
            search_types: default_search_types(),
            total_timeout_secs: None,
        }
    }
}

impl SearchConfig {
    /// The aggregation request these defaults describe
    #[must_use]
    pub fn to_request(&self) -> AssemblyRequest {
        AssemblyRequest {
            search_types: self.search_types.clone(),
            radius_meters: self.radius_meters,
            limit_per_category: self.limit_per_category,
        }
    }

    /// Overall deadline, if configured
    #[must_use]
    pub fn total_timeout(&self) -> Option<Duration> {
        self.total_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.radius_meters == 0 {
            return Err("search.radius_meters must be greater than 0".to_string());
        }

        if self.limit_per_category == 0 {
            return Err("search.limit_per_category must be greater than 0".to_string());
        }

        if self.search_types.is_empty() {
            return Err("search.search_types must not be empty".to_string());
        }

        if self.total_timeout_secs == Some(0) {
            return Err("search.total_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
