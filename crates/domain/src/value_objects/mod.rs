//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_location;
mod marker_style;
mod place_category;

pub use bounding_box::{BoundingBox, METERS_PER_DEGREE};
pub use geo_location::GeoLocation;
pub use marker_style::{
    DEFAULT_MARKER_COLOR, DEFAULT_MARKER_ICON, MarkerSize, MarkerStyle, marker_color, marker_icon,
};
pub use place_category::{
    DEFAULT_SEARCH_TYPES, FALLBACK_SEARCH_TYPE, is_known_search_type, known_search_types,
    resolve_categories,
};
