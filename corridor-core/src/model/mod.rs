//! Data model for corridor construction
//!
//! Contains the input street graph and the corridor network built from it.

pub mod corridors;
pub mod streets;

// Re-export of the main model structures
pub use corridors::{
    Connector, Corridor, CorridorAttributes, CorridorIndex, CorridorNetwork, CorridorType,
    DataQualityReport, EdgeChain,
};
pub use streets::{
    EdgeAttributes, RoadClass, StreetEdge, StreetGraph, StreetNode, SurfaceClassification,
    SurfaceType, paired_edge_id,
};
