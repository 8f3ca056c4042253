//! Conversion of raw Geoapify features into normalized places

use domain::{GeoLocation, PlaceResult, sort_by_distance};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{RawFeature, RawPlacesResponse};

const UNKNOWN_CATEGORY: &str = "unknown";
const UNKNOWN_NAME: &str = "Unknown";

/// Normalize a raw response into places sorted by ascending distance.
///
/// Features without two numeric, in-range coordinates are skipped one by one.
#[must_use]
pub fn normalize_response(response: &RawPlacesResponse) -> Vec<PlaceResult> {
    let mut places: Vec<PlaceResult> = response
        .features
        .iter()
        .filter_map(normalize_feature)
        .collect();

    sort_by_distance(&mut places);
    places
}

fn normalize_feature(feature: &RawFeature) -> Option<PlaceResult> {
    let Some(location) = feature_location(feature) else {
        debug!("Skipping feature without usable coordinates");
        return None;
    };

    let empty = Map::new();
    let props = feature.properties.as_ref().unwrap_or(&empty);

    let categories: Vec<&str> = props
        .get("categories")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let category = categories.first().copied().unwrap_or(UNKNOWN_CATEGORY);
    let subcategory = categories.get(1).copied().unwrap_or(category);

    let contact = props.get("contact");

    Some(PlaceResult {
        id: string_field(props.get("place_id")),
        name: string_field(props.get("name")).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        location,
        address: string_field(props.get("formatted")).unwrap_or_default(),
        distance: props.get("distance").map_or(0, coerce_distance),
        rating: extract_rating(props),
        phone: string_field(contact.and_then(|c| c.get("phone"))),
        website: string_field(contact.and_then(|c| c.get("website"))),
        opening_hours: props.get("opening_hours").filter(|v| !v.is_null()).cloned(),
        description: string_field(props.get("description")),
    })
}

fn feature_location(feature: &RawFeature) -> Option<GeoLocation> {
    let coords = feature.geometry.as_ref()?.coordinates.as_ref()?;
    if coords.len() < 2 {
        return None;
    }
    let lon = coords[0].as_f64()?;
    let lat = coords[1].as_f64()?;
    match GeoLocation::new(lat, lon) {
        Ok(location) => Some(location),
        Err(e) => {
            debug!(lat, lon, error = %e, "Rejecting out-of-range coordinates");
            None
        },
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(ToString::to_string)
}

/// Lenient numeric coercion: JSON numbers and numeric strings
fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Truncate a provider distance to whole meters, clamping at zero
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_distance(value: &Value) -> u32 {
    coerce_f64(value).map_or(0, |meters| meters.trunc().max(0.0) as u32)
}

/// Rating from the first source that holds a numeric value.
///
/// Sources, in order: `datasource.raw.rating`, `rating`, `datasource.raw.stars`.
/// Non-numeric values are skipped.
#[must_use]
pub fn extract_rating(props: &Map<String, Value>) -> Option<f64> {
    let raw = props.get("datasource").and_then(|d| d.get("raw"));

    [
        raw.and_then(|r| r.get("rating")),
        props.get("rating"),
        raw.and_then(|r| r.get("stars")),
    ]
    .into_iter()
    .flatten()
    .find_map(coerce_f64)
}
