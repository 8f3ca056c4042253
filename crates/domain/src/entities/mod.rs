//! Domain entities

mod event_location;
mod place_result;

pub use event_location::{DEFAULT_EVENT_NAME, EventLocation};
pub use place_result::{PlaceResult, sort_by_distance};
