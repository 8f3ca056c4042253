//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{
    BoundingBox, GeoLocation, known_search_types, marker_color, marker_icon, resolve_categories,
};
use domain::{PlaceResult, sort_by_distance};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert_eq!(loc.to_lon_lat(), [lon, lat]);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}

// ============================================================================
// BoundingBox Property Tests
// ============================================================================

mod bounding_box_tests {
    use super::*;

    proptest! {
        #[test]
        fn box_is_symmetric_around_center(
            lat in -89.0f64..=89.0f64,
            lon in -179.0f64..=179.0f64,
            radius in 0u32..50_000
        ) {
            let bounds = BoundingBox::around(lat, lon, radius);
            prop_assert!(((bounds.north - lat) - (lat - bounds.south)).abs() < 1e-9);
            let lon_offset = bounds.east - lon;
            let tolerance = 1e-9 * lon_offset.abs().max(1.0);
            prop_assert!((lon_offset - (lon - bounds.west)).abs() < tolerance);
            prop_assert!(bounds.north >= bounds.south);
            prop_assert!(bounds.east >= bounds.west);
        }

        #[test]
        fn longitude_span_never_narrower_than_latitude_span(
            lat in -90.0f64..=90.0f64,
            radius in 1u32..50_000
        ) {
            let bounds = BoundingBox::around(lat, 0.0, radius);
            prop_assert!(bounds.east - bounds.west >= (bounds.north - bounds.south) - 1e-9);
        }
    }
}

// ============================================================================
// Category and styling Property Tests
// ============================================================================

mod category_tests {
    use super::*;

    proptest! {
        #[test]
        fn unknown_tags_resolve_to_all_dining(tag in "[A-Z0-9_ ]{0,20}") {
            prop_assert_eq!(resolve_categories(&tag), resolve_categories("all_dining"));
        }

        #[test]
        fn styling_always_produces_a_value(category in ".{0,40}") {
            prop_assert!(!marker_color(&category).is_empty());
            prop_assert!(!marker_icon(&category).is_empty());
        }
    }

    #[test]
    fn known_tags_resolve_to_non_empty_sets() {
        for tag in known_search_types() {
            assert!(!resolve_categories(tag).is_empty());
        }
    }
}

// ============================================================================
// Place ordering Property Tests
// ============================================================================

mod place_ordering_tests {
    use super::*;

    fn place(index: usize, distance: u32) -> PlaceResult {
        PlaceResult {
            id: Some(index.to_string()),
            name: format!("Place {index}"),
            category: "catering.cafe".to_string(),
            subcategory: "catering.cafe".to_string(),
            location: GeoLocation::new_unchecked(0.0, 0.0),
            address: String::new(),
            distance,
            rating: None,
            phone: None,
            website: None,
            opening_hours: None,
            description: None,
        }
    }

    proptest! {
        #[test]
        fn sorted_ascending_and_stable(distances in prop::collection::vec(0u32..2000, 0..50)) {
            let mut places: Vec<_> = distances
                .iter()
                .enumerate()
                .map(|(i, d)| place(i, *d))
                .collect();
            sort_by_distance(&mut places);

            for pair in places.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
                if pair[0].distance == pair[1].distance {
                    let a: usize = pair[0].id.as_deref().unwrap().parse().unwrap();
                    let b: usize = pair[1].id.as_deref().unwrap().parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
