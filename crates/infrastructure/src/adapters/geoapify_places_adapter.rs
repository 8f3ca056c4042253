//! Geoapify places adapter - Implements PlaceSearchPort using integration_geoapify

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{PlaceQuery, PlaceSearchPort};
use async_trait::async_trait;
use domain::PlaceResult;
use integration_geoapify::{
    GeoapifyClient, GeoapifyConfig, GeoapifyError, PlaceSearchClient, PlaceSearchRequest,
    normalize_response,
};
use tracing::{debug, instrument};

/// Adapter for place search using the Geoapify Places API
///
/// By default a failed upstream call yields an empty result. With
/// [`GeoapifyPlacesAdapter::with_strict_errors`] failures are reported instead.
pub struct GeoapifyPlacesAdapter {
    client: GeoapifyClient,
    strict: bool,
}

impl std::fmt::Debug for GeoapifyPlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoapifyPlacesAdapter")
            .field("client", &"GeoapifyClient")
            .field("base_url", &self.client.config().base_url)
            .field("strict", &self.strict)
            .finish()
    }
}

impl GeoapifyPlacesAdapter {
    /// Create an adapter for the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, ApplicationError> {
        let client = GeoapifyClient::new(config).map_err(Self::map_error)?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: GeoapifyClient) -> Self {
        Self {
            client,
            strict: false,
        }
    }

    /// Report upstream failures instead of returning no places
    #[must_use]
    pub const fn with_strict_errors(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Map integration error to application error
    fn map_error(err: GeoapifyError) -> ApplicationError {
        match err {
            GeoapifyError::Timeout { timeout_secs } => {
                ApplicationError::timeout(Duration::from_secs(timeout_secs))
            },
            GeoapifyError::AuthenticationFailed(e) | GeoapifyError::ConfigurationError(e) => {
                ApplicationError::Configuration(e)
            },
            GeoapifyError::ParseError(e) => ApplicationError::Internal(e),
            e @ (GeoapifyError::ConnectionFailed(_)
            | GeoapifyError::RequestFailed(_)
            | GeoapifyError::RateLimitExceeded { .. }
            | GeoapifyError::ServiceUnavailable(_)) => {
                ApplicationError::ExternalService(e.to_string())
            },
        }
    }

    fn to_request(query: &PlaceQuery) -> PlaceSearchRequest {
        PlaceSearchRequest {
            latitude: query.center.latitude(),
            longitude: query.center.longitude(),
            categories: query.categories.clone(),
            radius_meters: query.radius_meters,
            limit: query.limit,
        }
    }
}

#[async_trait]
impl PlaceSearchPort for GeoapifyPlacesAdapter {
    #[instrument(
        skip(self, query),
        fields(
            lat = query.center.latitude(),
            lon = query.center.longitude(),
            radius = query.radius_meters,
            strict = self.strict
        )
    )]
    async fn search_places(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        let request = Self::to_request(query);

        let response = if self.strict {
            self.client
                .fetch_places(&request)
                .await
                .map_err(Self::map_error)?
        } else {
            self.client.search(&request).await
        };

        let places = normalize_response(&response);
        debug!(
            raw = response.features.len(),
            places = places.len(),
            "Normalized place search response"
        );
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
