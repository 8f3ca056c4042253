//! GeoJSON assembly service
//!
//! Runs one place search per requested search type around an event and
//! merges the results into a single [`FeatureCollection`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{
    BoundingBox, DEFAULT_SEARCH_TYPES, EventLocation, FALLBACK_SEARCH_TYPE, PlaceResult,
    resolve_categories,
};
use futures::future::join_all;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{PlaceQuery, PlaceSearchPort};
use crate::services::geojson::{CollectionProperties, Feature, FeatureCollection};
use crate::services::location_input::LocationInput;

/// Default search radius in meters
pub const DEFAULT_RADIUS_METERS: u32 = 1000;

/// Default number of places per search type
pub const DEFAULT_LIMIT_PER_CATEGORY: u32 = 10;

/// Default limit of a single-category search
pub const DEFAULT_SINGLE_SEARCH_LIMIT: u32 = 50;

/// What to search for around an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyRequest {
    /// Search-type tags, queried in this order
    pub search_types: Vec<String>,
    /// Search radius in meters
    pub radius_meters: u32,
    /// Maximum places kept per search type
    pub limit_per_category: u32,
}

impl Default for AssemblyRequest {
    fn default() -> Self {
        Self {
            search_types: DEFAULT_SEARCH_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            radius_meters: DEFAULT_RADIUS_METERS,
            limit_per_category: DEFAULT_LIMIT_PER_CATEGORY,
        }
    }
}

impl AssemblyRequest {
    /// Request for the given search types with default radius and limit
    #[must_use]
    pub fn for_types<S: AsRef<str>>(search_types: &[S]) -> Self {
        Self {
            search_types: search_types.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Set the search radius
    #[must_use]
    pub const fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Set the per-category limit
    #[must_use]
    pub const fn with_limit(mut self, limit_per_category: u32) -> Self {
        self.limit_per_category = limit_per_category;
        self
    }
}

/// Result of one search type, kept even when the search failed
#[derive(Debug)]
pub struct CategoryOutcome {
    /// The requested search-type tag
    pub search_type: String,
    /// Places found, or why the search failed
    pub result: Result<Vec<PlaceResult>, ApplicationError>,
}

impl CategoryOutcome {
    /// Number of places contributed, zero on failure
    #[must_use]
    pub fn count(&self) -> usize {
        self.result.as_ref().map_or(0, Vec::len)
    }
}

/// Assembles nearby places into a GeoJSON document
pub struct GeoJsonAssembler {
    places: Arc<dyn PlaceSearchPort>,
    total_timeout: Option<Duration>,
}

impl fmt::Debug for GeoJsonAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoJsonAssembler")
            .field("places", &"<PlaceSearchPort>")
            .field("total_timeout", &self.total_timeout)
            .finish()
    }
}

impl GeoJsonAssembler {
    /// Create an assembler without an overall deadline
    #[must_use]
    pub fn new(places: Arc<dyn PlaceSearchPort>) -> Self {
        Self {
            places,
            total_timeout: None,
        }
    }

    /// Bound the whole multi-category search by a deadline
    ///
    /// Search types still running when it expires count zero places.
    #[must_use]
    pub const fn with_total_timeout(mut self, total_timeout: Duration) -> Self {
        self.total_timeout = Some(total_timeout);
        self
    }

    /// Whether the underlying place search service is reachable
    pub async fn is_available(&self) -> bool {
        self.places.is_available().await
    }

    /// Search a single search type around an event
    ///
    /// Unlike [`Self::assemble`], a failing search is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad location, or the port's error.
    #[instrument(skip(self, input), fields(search_type = %search_type, radius = radius_meters))]
    pub async fn search_places_near_event(
        &self,
        input: impl Into<LocationInput> + Send,
        search_type: &str,
        radius_meters: u32,
        limit: u32,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        let event = input.into().into_event_location()?;
        self.search_category(&event, search_type, radius_meters, limit)
            .await
    }

    /// [`Self::search_places_near_event`] with `all_dining`, 1000 m and 50 results
    ///
    /// # Errors
    ///
    /// See [`Self::search_places_near_event`].
    pub async fn search_dining_near_event(
        &self,
        input: impl Into<LocationInput> + Send,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        self.search_places_near_event(
            input,
            FALLBACK_SEARCH_TYPE,
            DEFAULT_RADIUS_METERS,
            DEFAULT_SINGLE_SEARCH_LIMIT,
        )
        .await
    }

    /// Build the map document for an event
    ///
    /// The event marker is always the first feature. Search types are
    /// queried concurrently; a failing or overdue search type contributes no
    /// features and a count of zero.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad location.
    #[instrument(
        skip(self, input, request),
        fields(
            search_types = request.search_types.len(),
            radius = request.radius_meters,
            limit = request.limit_per_category
        )
    )]
    pub async fn assemble(
        &self,
        input: impl Into<LocationInput> + Send,
        request: &AssemblyRequest,
    ) -> Result<FeatureCollection, ApplicationError> {
        let event = input.into().into_event_location()?;
        let outcomes = self.collect_outcomes(&event, request).await;

        let mut features = vec![Feature::event(&event)];
        let mut categories = BTreeMap::new();
        let mut failed = 0_usize;

        for outcome in outcomes {
            let count = outcome.count();
            match outcome.result {
                Ok(places) => features.extend(places.iter().map(Feature::place)),
                Err(e) => {
                    failed += 1;
                    warn!(
                        search_type = %outcome.search_type,
                        error = %e,
                        retryable = e.is_retryable(),
                        "Category search failed, counting zero places"
                    );
                },
            }
            categories.insert(outcome.search_type, count);
        }

        let total_places = features.len() - 1;
        info!(
            event = %event.name,
            total_places,
            failed_categories = failed,
            "Assembled place collection"
        );

        Ok(FeatureCollection {
            features,
            properties: CollectionProperties {
                center: event.location.to_lon_lat(),
                radius: request.radius_meters,
                categories,
                bounds: BoundingBox::around(event.lat(), event.lon(), request.radius_meters),
                total_places,
            },
        })
    }

    async fn collect_outcomes(
        &self,
        event: &EventLocation,
        request: &AssemblyRequest,
    ) -> Vec<CategoryOutcome> {
        let deadline = self
            .total_timeout
            .map(|total| (total, Instant::now() + total));

        let searches = request.search_types.iter().map(|search_type| async move {
            let search = self.search_category(
                event,
                search_type,
                request.radius_meters,
                request.limit_per_category,
            );
            let result = match deadline {
                Some((total, at)) => timeout_at(at, search).await.unwrap_or_else(|_| {
                    debug!(search_type = %search_type, ?total, "Category search overran deadline");
                    Err(ApplicationError::timeout(total))
                }),
                None => search.await,
            };
            CategoryOutcome {
                search_type: search_type.clone(),
                result,
            }
        });

        join_all(searches).await
    }

    async fn search_category(
        &self,
        event: &EventLocation,
        search_type: &str,
        radius_meters: u32,
        limit: u32,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        let categories = resolve_categories(search_type);
        debug!(search_type, ?categories, "Searching category");

        let query = PlaceQuery::new(event.location, categories, radius_meters, limit);
        let mut places = self.places.search_places(&query).await?;
        places.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockPlaceSearchPort;
    use domain::{DomainError, GeoLocation};
    use serde_json::json;

    fn place(name: &str, category: &str, distance: u32) -> PlaceResult {
        PlaceResult {
            id: Some(format!("id-{name}")),
            name: name.to_string(),
            category: category.to_string(),
            subcategory: category.to_string(),
            location: GeoLocation::new_unchecked(40.751, -73.993),
            address: String::new(),
            distance,
            rating: None,
            phone: None,
            website: None,
            opening_hours: None,
            description: None,
        }
    }

    fn msg() -> EventLocation {
        EventLocation::new("Madison Square Garden", 40.7505, -73.9934).unwrap()
    }

    fn assembler(mock: MockPlaceSearchPort) -> GeoJsonAssembler {
        GeoJsonAssembler::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn single_restaurant_end_to_end() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .withf(|q| {
                q.categories == ["catering.restaurant", "catering.fast_food"]
                    && q.radius_meters == 1000
                    && q.limit == 10
            })
            .times(1)
            .returning(|_| Ok(vec![place("Keens", "catering.restaurant", 300)]));

        let collection = assembler(mock)
            .assemble(msg(), &AssemblyRequest::for_types(&["restaurants"]))
            .await
            .unwrap();

        assert_eq!(collection.features.len(), 2);
        assert!(collection.features[0].is_event());
        assert_eq!(collection.properties.total_places, 1);
        assert_eq!(
            collection.properties.categories,
            BTreeMap::from([("restaurants".to_string(), 1)])
        );
        assert_eq!(collection.properties.center, [-73.9934, 40.7505]);

        let json = collection.to_json().unwrap();
        assert_eq!(json["features"][1]["properties"]["marker_color"], "green");
        assert_eq!(json["features"][1]["properties"]["marker_icon"], "cutlery");
        assert_eq!(json["features"][1]["properties"]["distance"], 300);
    }

    #[tokio::test]
    async fn failing_category_is_isolated() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .withf(|q| q.categories.iter().any(|c| c == "catering.bar"))
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 500".to_string())));
        mock.expect_search_places()
            .withf(|q| q.categories.iter().any(|c| c == "catering.restaurant"))
            .returning(|_| {
                Ok(vec![
                    place("a", "catering.restaurant", 10),
                    place("b", "catering.fast_food", 20),
                ])
            });

        let request = AssemblyRequest::for_types(&["bars", "restaurants"]);
        let collection = assembler(mock).assemble(msg(), &request).await.unwrap();

        assert_eq!(collection.features.len(), 3);
        assert_eq!(collection.properties.total_places, 2);
        assert_eq!(collection.properties.categories["bars"], 0);
        assert_eq!(collection.properties.categories["restaurants"], 2);
    }

    #[tokio::test]
    async fn results_follow_requested_tag_order() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .withf(|q| q.categories.iter().any(|c| c == "tourism.attraction"))
            .returning(|_| Ok(vec![place("sight", "tourism.attraction", 900)]));
        mock.expect_search_places()
            .withf(|q| q.categories.iter().any(|c| c == "catering.cafe"))
            .returning(|_| Ok(vec![place("cafe", "catering.cafe", 5)]));

        let request = AssemblyRequest::for_types(&["attractions", "cafes"]);
        let collection = assembler(mock).assemble(msg(), &request).await.unwrap();
        let json = collection.to_json().unwrap();

        assert_eq!(json["features"][1]["properties"]["name"], "sight");
        assert_eq!(json["features"][2]["properties"]["name"], "cafe");
    }

    #[tokio::test]
    async fn results_are_capped_per_category() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places().returning(|_| {
            Ok((0..5)
                .map(|i| place(&format!("p{i}"), "catering.restaurant", i * 10))
                .collect())
        });

        let request = AssemblyRequest::for_types(&["restaurants"]).with_limit(3);
        let collection = assembler(mock).assemble(msg(), &request).await.unwrap();

        assert_eq!(collection.properties.total_places, 3);
        assert_eq!(collection.properties.categories["restaurants"], 3);
    }

    #[tokio::test]
    async fn unknown_tag_searches_dining_set() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .withf(|q| q.categories.len() == 5 && q.categories[0] == "catering.restaurant")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let request = AssemblyRequest::for_types(&["nightlife"]);
        let collection = assembler(mock).assemble(msg(), &request).await.unwrap();

        assert_eq!(collection.properties.categories["nightlife"], 0);
        assert_eq!(collection.features.len(), 1);
    }

    #[tokio::test]
    async fn default_request_queries_five_types() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .times(5)
            .returning(|_| Ok(Vec::new()));

        let collection = assembler(mock)
            .assemble(msg(), &AssemblyRequest::default())
            .await
            .unwrap();

        let tags: Vec<&str> = collection
            .properties
            .categories
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            tags,
            vec!["attractions", "bars", "entertainment", "restaurants", "shopping"]
        );
        assert_eq!(collection.properties.radius, 1000);
        assert_eq!(collection.properties.total_places, 0);
    }

    #[tokio::test]
    async fn loose_location_is_normalized() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places().returning(|_| Ok(Vec::new()));

        let input = LocationInput::from_json(json!({"latitude": 40.7505, "longitude": -73.9934}))
            .unwrap();
        let collection = assembler(mock)
            .assemble(input, &AssemblyRequest::for_types(&["bars"]))
            .await
            .unwrap();

        let json = collection.to_json().unwrap();
        assert_eq!(json["features"][0]["properties"]["name"], "Event Location");
        assert_eq!(json["features"][0]["geometry"]["coordinates"], json!([-73.9934, 40.7505]));
    }

    #[tokio::test]
    async fn missing_coordinates_fail_before_searching() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places().never();

        let input = LocationInput::from_json(json!({"name": "Nowhere"})).unwrap();
        let err = assembler(mock)
            .assemble(input, &AssemblyRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingCoordinates(_))
        ));
    }

    #[tokio::test]
    async fn bounds_follow_event_and_radius() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places().returning(|_| Ok(Vec::new()));

        let event = EventLocation::new("Null Island", 0.0, 0.0).unwrap();
        let request = AssemblyRequest::for_types(&["bars"]).with_radius(111_000);
        let collection = assembler(mock).assemble(event, &request).await.unwrap();

        let bounds = collection.properties.bounds;
        assert!((bounds.north - 1.0).abs() < 1e-9);
        assert!((bounds.south + 1.0).abs() < 1e-9);
        assert!((bounds.east - 1.0).abs() < 1e-9);
        assert!((bounds.west + 1.0).abs() < 1e-9);
    }

    /// Answers restaurants at once and stalls on everything else
    struct StallingBarsPort;

    #[async_trait::async_trait]
    impl PlaceSearchPort for StallingBarsPort {
        async fn search_places(
            &self,
            query: &PlaceQuery,
        ) -> Result<Vec<PlaceResult>, ApplicationError> {
            if query.categories.iter().any(|c| c == "catering.restaurant") {
                return Ok(vec![place("Keens", "catering.restaurant", 300)]);
            }
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn deadline_keeps_event_and_finished_categories() {
        let assembler = GeoJsonAssembler::new(Arc::new(StallingBarsPort))
            .with_total_timeout(Duration::from_millis(100));
        let request = AssemblyRequest::for_types(&["restaurants", "bars"]);

        let collection = assembler.assemble(msg(), &request).await.unwrap();

        assert_eq!(collection.features.len(), 2);
        assert!(collection.features[0].is_event());
        assert_eq!(collection.properties.total_places, 1);
        assert_eq!(collection.properties.categories["restaurants"], 1);
        assert_eq!(collection.properties.categories["bars"], 0);
    }

    #[tokio::test]
    async fn overdue_category_reports_timeout() {
        let assembler = GeoJsonAssembler::new(Arc::new(StallingBarsPort))
            .with_total_timeout(Duration::from_millis(100));
        let request = AssemblyRequest::for_types(&["restaurants", "bars"]);

        let outcomes = assembler.collect_outcomes(&msg(), &request).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].search_type, "restaurants");
        assert_eq!(outcomes[0].count(), 1);
        assert_eq!(outcomes[1].search_type, "bars");
        assert!(matches!(
            outcomes[1].result,
            Err(ApplicationError::Timeout { timeout_ms: 100 })
        ));
    }

    #[tokio::test]
    async fn duplicate_tags_share_one_count() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places().times(2).returning(|_| {
            Ok(vec![
                place("a", "catering.restaurant", 10),
                place("b", "catering.fast_food", 20),
            ])
        });

        let request = AssemblyRequest::for_types(&["restaurants", "restaurants"]);
        let collection = assembler(mock).assemble(msg(), &request).await.unwrap();
        let counted: usize = collection.properties.categories.values().sum();

        assert_eq!(collection.features.len(), 1 + 2 * 2);
        assert_eq!(collection.properties.categories.len(), 1);
        assert_eq!(collection.properties.categories["restaurants"], 2);
        assert_eq!(collection.properties.total_places, 4);
        assert_ne!(collection.properties.total_places, counted);
    }

    #[tokio::test]
    async fn single_search_defaults_to_dining() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .withf(|q| q.categories.len() == 5 && q.limit == 50 && q.radius_meters == 1000)
            .times(1)
            .returning(|_| Ok(vec![place("diner", "catering.restaurant", 80)]));

        let places = assembler(mock).search_dining_near_event(msg()).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "diner");
    }

    #[tokio::test]
    async fn single_search_propagates_errors() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_search_places()
            .returning(|_| Err(ApplicationError::ExternalService("down".to_string())));

        let result = assembler(mock)
            .search_places_near_event(msg(), "cafes", 500, 5)
            .await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }

    #[tokio::test]
    async fn availability_delegates_to_port() {
        let mut mock = MockPlaceSearchPort::new();
        mock.expect_is_available().returning(|| false);
        assert!(!assembler(mock).is_available().await);
    }
}
