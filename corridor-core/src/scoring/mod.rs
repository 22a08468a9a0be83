//! Per-activity corridor scoring
//!
//! Scores are computed on demand after a network is built and stored on
//! each corridor under its activity.

mod activity;
mod params;
mod scorer;
pub mod tables;

pub use activity::ActivityType;
pub use params::{ScoreWeights, ScoringParams};
pub use scorer::{
    CorridorScore, score_character, score_corridor, score_flow, score_network, score_safety,
    score_surface,
};
