//! Street network components - nodes and edges

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use super::EdgeAttributes;
use crate::algo::geometry::{entry_bearing, exit_bearing};
use crate::{EdgeId, NodeId};

/// Street graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetNode {
    pub id: NodeId,
    /// Node coordinates (lon, lat)
    pub geometry: Point<f64>,
    pub has_stop_sign: bool,
    pub has_signal: bool,
    pub has_crossing: bool,
}

impl StreetNode {
    pub fn new(id: impl Into<NodeId>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            geometry: Point::new(lon, lat),
            has_stop_sign: false,
            has_signal: false,
            has_crossing: false,
        }
    }

    /// Stop sign or traffic signal at this node
    pub fn is_controlled(&self) -> bool {
        self.has_stop_sign || self.has_signal
    }
}

/// Street graph edge (directed street segment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetEdge {
    pub id: EdgeId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    /// Ordered coordinates from `from_node_id` to `to_node_id`
    pub geometry: LineString<f64>,
    pub attributes: EdgeAttributes,
}

impl StreetEdge {
    pub fn new(
        id: impl Into<EdgeId>,
        from_node_id: impl Into<NodeId>,
        to_node_id: impl Into<NodeId>,
        geometry: LineString<f64>,
        attributes: EdgeAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            from_node_id: from_node_id.into(),
            to_node_id: to_node_id.into(),
            geometry,
            attributes,
        }
    }

    pub fn length_meters(&self) -> f64 {
        self.attributes.length_meters
    }

    /// Bearing of the first geometry segment, 0 for degenerate geometry
    pub fn entry_bearing(&self) -> f64 {
        entry_bearing(&self.geometry)
    }

    /// Bearing of the last geometry segment, 0 for degenerate geometry
    pub fn exit_bearing(&self) -> f64 {
        exit_bearing(&self.geometry)
    }

    /// Copy of this edge running the other way, with the paired id
    pub fn reversed(&self, id: impl Into<EdgeId>) -> Self {
        let mut coords = self.geometry.0.clone();
        coords.reverse();
        Self {
            id: id.into(),
            from_node_id: self.to_node_id.clone(),
            to_node_id: self.from_node_id.clone(),
            geometry: LineString::new(coords),
            attributes: self.attributes.clone(),
        }
    }
}
