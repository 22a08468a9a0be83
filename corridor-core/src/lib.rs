//! Corridor network construction and scoring.
//!
//! Turns a tagged street/path graph into long, internally consistent
//! corridors linked by short connectors, and scores corridors per activity
//! type. See [`build_corridor_network`] and [`score_network`].

pub mod algo;
pub mod building;
mod error;
pub mod export;
pub mod model;
pub mod prelude;
pub mod scoring;

pub use building::{
    CompatibilityWeights, CorridorBuilderOptions, TierThresholds, build_corridor_network,
    build_corridor_network_par,
};
pub use error::Error;
pub use model::{
    Connector, Corridor, CorridorAttributes, CorridorIndex, CorridorNetwork, CorridorType,
    DataQualityReport, EdgeAttributes, EdgeChain, RoadClass, StreetEdge, StreetGraph, StreetNode,
    SurfaceClassification, SurfaceType,
};
pub use scoring::{
    ActivityType, CorridorScore, ScoreWeights, ScoringParams, score_corridor, score_network,
};

/// Identifier of a street graph node
pub type NodeId = String;
/// Identifier of a logical (directed) street graph edge
pub type EdgeId = String;
/// Identifier of a corridor or connector in a [`CorridorNetwork`]
pub type EntityId = String;
