//! Event location input normalization
//!
//! Callers hand the venue over either as a typed [`EventLocation`] or as a
//! loosely-typed JSON object. Both are normalized once, here, before any
//! search is issued.

use domain::{DEFAULT_EVENT_NAME, DomainError, EventLocation};
use serde_json::{Map, Value};

/// Keys accepted for the latitude of a loose location, in lookup order
const LATITUDE_KEYS: &[&str] = &["lat", "latitude"];

/// Keys accepted for the longitude of a loose location, in lookup order
const LONGITUDE_KEYS: &[&str] = &["lon", "longitude", "lng"];

/// Keys accepted for the upstream venue id of a loose location
const VENUE_ID_KEYS: &[&str] = &["venueId", "venue_id"];

/// Venue name used when a Ticketmaster venue carries none
pub const UNKNOWN_VENUE_NAME: &str = "Unknown Venue";

/// Location of the event to search around
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Already validated event location
    Structured(EventLocation),
    /// Loose key/value object with `lat`/`latitude` and `lon`/`longitude` aliases
    Loose(Map<String, Value>),
}

impl LocationInput {
    /// Wrap an arbitrary JSON value
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` when the value is not an object.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self::Loose(map)),
            other => Err(DomainError::ValidationError(format!(
                "event location must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Extract the first venue of a Ticketmaster Discovery event
    ///
    /// Reads `_embedded.venues[0]`: `name`, `location.latitude`,
    /// `location.longitude` (numeric strings), `address.line1` and `id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the event has no venue or the venue
    /// has no usable coordinates.
    pub fn from_ticketmaster_event(event: &Value) -> Result<EventLocation, DomainError> {
        let venue = event
            .pointer("/_embedded/venues/0")
            .ok_or_else(|| DomainError::ValidationError("event has no venue".to_string()))?;
        Self::from_ticketmaster_venue(venue)
    }

    /// Convert a single Ticketmaster venue object
    ///
    /// # Errors
    ///
    /// Returns a validation error when the venue has no usable coordinates.
    pub fn from_ticketmaster_venue(venue: &Value) -> Result<EventLocation, DomainError> {
        let location = venue.get("location");
        let latitude = location
            .and_then(|l| l.get("latitude"))
            .and_then(coerce_coordinate);
        let longitude = location
            .and_then(|l| l.get("longitude"))
            .and_then(coerce_coordinate);

        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(DomainError::missing_coordinates(
                "venue location.latitude/longitude",
            ));
        };

        let name = string_at(venue, "/name").unwrap_or(UNKNOWN_VENUE_NAME);
        let event = EventLocation::new(name, latitude, longitude)?
            .with_address(string_at(venue, "/address/line1").unwrap_or_default())
            .with_venue_id(string_at(venue, "/id").unwrap_or_default());
        Ok(event)
    }

    /// Normalize into a validated [`EventLocation`]
    ///
    /// For loose input the first present alias wins; coordinates may be JSON
    /// numbers or numeric strings. Name defaults to `"Event Location"`,
    /// address and venue id to empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingCoordinates` when either coordinate is
    /// absent or non-numeric, and `DomainError::InvalidCoordinates` when
    /// they are out of range.
    pub fn into_event_location(self) -> Result<EventLocation, DomainError> {
        let map = match self {
            Self::Structured(event) => return Ok(event),
            Self::Loose(map) => map,
        };

        let latitude = first_coordinate(&map, LATITUDE_KEYS);
        let longitude = first_coordinate(&map, LONGITUDE_KEYS);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(DomainError::missing_coordinates(format!(
                "expected one of {LATITUDE_KEYS:?} and one of {LONGITUDE_KEYS:?}"
            )));
        };

        let name = map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_EVENT_NAME);
        let address = map.get("address").and_then(Value::as_str).unwrap_or_default();
        let venue_id = VENUE_ID_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .unwrap_or_default();

        Ok(EventLocation::new(name, latitude, longitude)?
            .with_address(address)
            .with_venue_id(venue_id))
    }
}

impl From<EventLocation> for LocationInput {
    fn from(event: EventLocation) -> Self {
        Self::Structured(event)
    }
}

impl From<Map<String, Value>> for LocationInput {
    fn from(map: Map<String, Value>) -> Self {
        Self::Loose(map)
    }
}

/// Value of the first alias present in the map
fn first_coordinate(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
        .and_then(coerce_coordinate)
}

fn coerce_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn string_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loose(value: Value) -> LocationInput {
        LocationInput::from_json(value).unwrap()
    }

    #[test]
    fn structured_passes_through() {
        let event = EventLocation::new("MSG", 40.7505, -73.9934).unwrap();
        let input = LocationInput::from(event.clone());
        assert_eq!(input.into_event_location().unwrap(), event);
    }

    #[test]
    fn short_aliases_are_accepted() {
        let event = loose(json!({"name": "MSG", "lat": 40.7505, "lon": -73.9934}))
            .into_event_location()
            .unwrap();
        assert_eq!(event.name, "MSG");
        assert!((event.lat() - 40.7505).abs() < f64::EPSILON);
        assert!((event.lon() + 73.9934).abs() < f64::EPSILON);
    }

    #[test]
    fn long_aliases_are_accepted() {
        let event = loose(json!({"latitude": 51.5, "longitude": -0.12}))
            .into_event_location()
            .unwrap();
        assert!((event.lat() - 51.5).abs() < f64::EPSILON);
        assert!((event.lon() + 0.12).abs() < f64::EPSILON);
    }

    #[test]
    fn lng_alias_is_accepted() {
        let event = loose(json!({"lat": 1.0, "lng": 2.0}))
            .into_event_location()
            .unwrap();
        assert!((event.lon() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_for_optional_fields() {
        let event = loose(json!({"lat": 1.0, "lon": 2.0}))
            .into_event_location()
            .unwrap();
        assert_eq!(event.name, "Event Location");
        assert_eq!(event.address, "");
        assert_eq!(event.venue_id, "");
    }

    #[test]
    fn zero_latitude_is_a_real_coordinate() {
        let event = loose(json!({"lat": 0.0, "latitude": 45.0, "lon": 10.0}))
            .into_event_location()
            .unwrap();
        assert!(event.lat().abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let event = loose(json!({"lat": "40.7505", "lon": " -73.9934 ", "venueId": "KovZ"}))
            .into_event_location()
            .unwrap();
        assert!((event.lat() - 40.7505).abs() < f64::EPSILON);
        assert_eq!(event.venue_id, "KovZ");
    }

    #[test]
    fn missing_longitude_is_rejected() {
        let err = loose(json!({"lat": 40.0})).into_event_location().unwrap_err();
        assert!(matches!(err, DomainError::MissingCoordinates(_)));
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let err = loose(json!({"lat": "north", "lon": 1.0}))
            .into_event_location()
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingCoordinates(_)));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let err = loose(json!({"lat": 91.0, "lon": 0.0}))
            .into_event_location()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCoordinates { .. }));
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = LocationInput::from_json(json!([40.0, -73.0])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn ticketmaster_event_extracts_first_venue() {
        let event = json!({
            "name": "Knicks vs Celtics",
            "_embedded": {
                "venues": [{
                    "id": "KovZpZA7AAEA",
                    "name": "Madison Square Garden",
                    "address": {"line1": "7th Ave & 32nd Street"},
                    "location": {"latitude": "40.7505", "longitude": "-73.9934"}
                }, {
                    "name": "Second venue",
                    "location": {"latitude": "0", "longitude": "0"}
                }]
            }
        });

        let location = LocationInput::from_ticketmaster_event(&event).unwrap();
        assert_eq!(location.name, "Madison Square Garden");
        assert_eq!(location.address, "7th Ave & 32nd Street");
        assert_eq!(location.venue_id, "KovZpZA7AAEA");
        assert!((location.lat() - 40.7505).abs() < f64::EPSILON);
        assert!((location.lon() + 73.9934).abs() < f64::EPSILON);
    }

    #[test]
    fn ticketmaster_venue_without_name_is_unknown() {
        let venue = json!({"location": {"latitude": "10.5", "longitude": "20.25"}});
        let location = LocationInput::from_ticketmaster_venue(&venue).unwrap();
        assert_eq!(location.name, "Unknown Venue");
        assert_eq!(location.address, "");
    }

    #[test]
    fn ticketmaster_event_without_venue_is_rejected() {
        let err = LocationInput::from_ticketmaster_event(&json!({"_embedded": {"venues": []}}))
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn ticketmaster_venue_without_coordinates_is_rejected() {
        let err = LocationInput::from_ticketmaster_venue(&json!({"name": "Nowhere"})).unwrap_err();
        assert!(matches!(err, DomainError::MissingCoordinates(_)));
    }
}
