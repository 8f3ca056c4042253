//! Adapters implementing application ports

mod geoapify_places_adapter;

pub use geoapify_places_adapter::GeoapifyPlacesAdapter;
