// Re-export key components
pub use crate::algo::chains::{build_chains, build_chains_par};
pub use crate::building::{
    CorridorBuilderOptions, build_corridor_network, build_corridor_network_par,
};
pub use crate::export::network_to_geojson;
pub use crate::model::{
    Corridor, CorridorIndex, CorridorNetwork, CorridorType, EdgeAttributes, EdgeChain, RoadClass,
    StreetEdge, StreetGraph, StreetNode, SurfaceClassification, SurfaceType,
};
pub use crate::scoring::{
    ActivityType, CorridorScore, ScoreWeights, ScoringParams, score_corridor, score_network,
};

// Core identifier types
pub use crate::EdgeId;
pub use crate::EntityId;
pub use crate::NodeId;
pub use crate::Error;
