//! Street network input: nodes, edges and their attributes

pub mod attributes;
pub mod components;
pub mod network;

pub use attributes::{EdgeAttributes, RoadClass, RoadClassGroup, SurfaceClassification, SurfaceType};
pub use components::{StreetEdge, StreetNode};
pub use network::{StreetGraph, paired_edge_id};
