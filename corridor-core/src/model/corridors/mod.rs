//! Corridor network output: chains, corridors, connectors

pub mod index;
pub mod network;
pub mod quality;
pub mod types;

pub use index::CorridorIndex;
pub use network::CorridorNetwork;
pub use quality::DataQualityReport;
pub use types::{Connector, Corridor, CorridorAttributes, CorridorType, EdgeChain};
