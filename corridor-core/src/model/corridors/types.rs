use geo::LineString;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{RoadClass, SurfaceType};
use crate::scoring::{ActivityType, CorridorScore};
use crate::{EdgeId, EntityId, NodeId};

/// Ordered, direction-continuous run of edges produced by chain building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeChain {
    /// Traversed edges; `edge_ids[i]` ends where `edge_ids[i + 1]` starts
    pub edge_ids: Vec<EdgeId>,
    /// Opposite logical edges of the traversed two-way streets, claimed together with them
    pub paired_edge_ids: Vec<EdgeId>,
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    pub total_length_meters: f64,
}

impl EdgeChain {
    /// Every logical edge owned by this chain
    pub fn member_edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.edge_ids.iter().chain(&self.paired_edge_ids)
    }

    pub fn len(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_ids.is_empty()
    }
}

/// Infrastructure tier deciding the minimum corridor length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorridorType {
    DedicatedInfra,
    NamedBikeInfra,
    NamedRoad,
    Unnamed,
}

/// Length-weighted attributes of a whole chain
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorridorAttributes {
    pub length_meters: f64,
    pub predominant_road_class: RoadClass,
    pub predominant_surface: SurfaceType,
    pub surface_confidence: f64,
    pub bicycle_infra_continuity: f64,
    pub pedestrian_path_continuity: f64,
    pub separation_continuity: f64,
    pub traffic_calming_continuity: f64,
    /// Distinct stop-sign/signal nodes per km
    pub stop_density_per_km: f64,
    pub turns_count: usize,
    /// `None` if no edge defines a speed limit
    pub average_speed_limit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: EntityId,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub corridor_type: CorridorType,
    pub attributes: CorridorAttributes,
    pub edge_ids: Vec<EdgeId>,
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    /// Simplified display geometry
    pub geometry: LineString<f64>,
    pub is_oneway: bool,
    /// Filled on demand by the scorer
    #[serde(default)]
    pub scores: HashMap<ActivityType, CorridorScore>,
}

impl Corridor {
    pub fn endpoints(&self) -> [&NodeId; 2] {
        [&self.start_node_id, &self.end_node_id]
    }

    pub fn score(&self, activity: ActivityType) -> Option<&CorridorScore> {
        self.scores.get(&activity)
    }
}

/// Chain too short for its tier, linking corridors together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: EntityId,
    pub edge_ids: Vec<EdgeId>,
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    pub length_meters: f64,
    /// Corridors this connector joins
    pub corridor_ids: Vec<EntityId>,
    pub crosses_major_road: bool,
    pub has_signal: bool,
    pub has_stop: bool,
    /// 0 = trivial, 1 = uncontrolled major-road crossing
    pub crossing_difficulty: f64,
    pub geometry: LineString<f64>,
}

impl Connector {
    pub fn endpoints(&self) -> [&NodeId; 2] {
        [&self.start_node_id, &self.end_node_id]
    }
}
