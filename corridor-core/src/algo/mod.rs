//! Chain building and the per-chain computations behind corridor promotion

pub mod aggregate;
pub mod chains;
pub mod classify;
pub mod compatibility;
pub mod components;
pub mod geometry;
pub mod simplify;

pub use aggregate::{aggregate_attributes, count_turns, derive_name};
pub use chains::{ChainBuilder, build_chains, build_chains_par};
pub use classify::{Classification, classify_chain};
pub use compatibility::{chain_homogeneity, edge_compatibility};
pub use components::connected_components;
pub use simplify::{douglas_peucker, simplify_chain_geometry};
