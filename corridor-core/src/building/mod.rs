//! Turning a street graph into a corridor network: options, chain
//! promotion and the corridor/connector adjacency.

mod builder;
mod config;
mod connectors;

pub use builder::{build_corridor_network, build_corridor_network_par};
pub use config::{CompatibilityWeights, CorridorBuilderOptions, TierThresholds};
pub use connectors::crossing_difficulty;
