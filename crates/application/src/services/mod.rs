//! Application services - Use case implementations

mod geojson;
mod geojson_assembler;
mod location_input;

pub use geojson::{
    CollectionProperties, EVENT_FEATURE_ID, EventProperties, Feature, FeatureCollection,
    FeatureProperties, PlaceProperties, PointGeometry,
};
pub use geojson_assembler::{
    AssemblyRequest, CategoryOutcome, DEFAULT_LIMIT_PER_CATEGORY, DEFAULT_RADIUS_METERS,
    DEFAULT_SINGLE_SEARCH_LIMIT, GeoJsonAssembler,
};
pub use location_input::{LocationInput, UNKNOWN_VENUE_NAME};
