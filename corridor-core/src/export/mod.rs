//! Serialization of a corridor network for display layers

mod to_geojson;

pub use to_geojson::network_to_geojson;
