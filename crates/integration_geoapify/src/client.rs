//! Geoapify Places client
//!
//! HTTP client for `GET /v2/places` with a circular filter and proximity bias.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::GeoapifyConfig;
use crate::error::GeoapifyError;
use crate::models::RawPlacesResponse;

/// Parameters of one place search
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSearchRequest {
    /// Center latitude
    pub latitude: f64,
    /// Center longitude
    pub longitude: f64,
    /// Provider category codes to search
    pub categories: Vec<String>,
    /// Search radius in meters
    pub radius_meters: u32,
    /// Maximum number of results
    pub limit: u32,
}

impl PlaceSearchRequest {
    /// Create a search request
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        categories: &[&str],
        radius_meters: u32,
        limit: u32,
    ) -> Self {
        Self {
            latitude,
            longitude,
            categories: categories.iter().map(ToString::to_string).collect(),
            radius_meters,
            limit,
        }
    }

    /// Comma-joined category codes
    #[must_use]
    pub fn categories_param(&self) -> String {
        self.categories.join(",")
    }

    /// Circular geofence, longitude first
    #[must_use]
    pub fn filter_param(&self) -> String {
        format!(
            "circle:{},{},{}",
            self.longitude, self.latitude, self.radius_meters
        )
    }

    /// Proximity bias at the search center, longitude first
    #[must_use]
    pub fn bias_param(&self) -> String {
        format!("proximity:{},{}", self.longitude, self.latitude)
    }

    fn query_params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("categories", self.categories_param()),
            ("filter", self.filter_param()),
            ("bias", self.bias_param()),
            ("limit", self.limit.to_string()),
            ("apiKey", api_key.to_string()),
            ("format", "geojson".to_string()),
        ]
    }
}

/// Trait for place search clients
#[async_trait]
pub trait PlaceSearchClient: Send + Sync {
    /// Perform the search, reporting every failure
    async fn fetch_places(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<RawPlacesResponse, GeoapifyError>;

    /// Perform the search, degrading any failure to an empty response
    async fn search(&self, request: &PlaceSearchRequest) -> RawPlacesResponse {
        match self.fetch_places(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    categories = %request.categories_param(),
                    "Place search failed, returning empty result"
                );
                RawPlacesResponse::empty()
            },
        }
    }

    /// Check if the places service is reachable with the configured key
    async fn is_healthy(&self) -> bool;
}

/// Geoapify Places API client
#[derive(Debug)]
pub struct GeoapifyClient {
    client: Client,
    config: GeoapifyConfig,
}

impl GeoapifyClient {
    /// Create a new Geoapify client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, GeoapifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("CityPulse/1.0")
            .build()
            .map_err(|e| GeoapifyError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Create a client with an already configured `reqwest::Client`
    #[must_use]
    pub fn with_http_client(client: Client, config: &GeoapifyConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &GeoapifyConfig {
        &self.config
    }

    fn map_send_error(&self, e: &reqwest::Error) -> GeoapifyError {
        if e.is_timeout() {
            GeoapifyError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_connect() {
            GeoapifyError::ConnectionFailed(e.to_string())
        } else {
            GeoapifyError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl PlaceSearchClient for GeoapifyClient {
    #[instrument(
        skip(self, request),
        fields(
            lat = request.latitude,
            lon = request.longitude,
            radius = request.radius_meters,
            limit = request.limit
        )
    )]
    async fn fetch_places(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<RawPlacesResponse, GeoapifyError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GeoapifyError::ConfigurationError(
                "Geoapify API key is required".to_string(),
            ));
        }

        let url = self.config.places_url();
        debug!(url = %url, categories = %request.categories_param(), "Sending place search");

        let response = self
            .client
            .get(&url)
            .query(&request.query_params(&self.config.api_key))
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        debug!(status = %status, "Received place search response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(GeoapifyError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeoapifyError::AuthenticationFailed(format!("HTTP {status}")));
        }

        if status.is_server_error() {
            return Err(GeoapifyError::ServiceUnavailable(format!("HTTP {status}")));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeoapifyError::RequestFailed(format!(
                "HTTP {status}: {error_text}"
            )));
        }

        let places: RawPlacesResponse = response
            .json()
            .await
            .map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        debug!(features = places.features.len(), "Parsed place search response");
        Ok(places)
    }

    async fn is_healthy(&self) -> bool {
        let probe = PlaceSearchRequest::new(0.0, 0.0, &["catering"], 1, 1);
        self.fetch_places(&probe).await.is_ok()
    }
}
