use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{RoadClass, StreetGraph, SurfaceType};

/// Counters of input anomalies that were tolerated during a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// Edges whose road class could not be mapped
    pub unknown_road_class_edges: usize,
    /// Edges with an unknown surface type
    pub unknown_surface_edges: usize,
    /// Edge endpoints missing from the node set
    pub dangling_node_references: usize,
    /// Edges with fewer than two geometry points
    pub degenerate_geometry_edges: usize,
}

impl DataQualityReport {
    pub fn from_graph(graph: &StreetGraph) -> Self {
        let mut report = Self::default();
        for edge in graph.edges() {
            if edge.attributes.road_class == RoadClass::Other {
                report.unknown_road_class_edges += 1;
            }
            if edge.attributes.surface.surface == SurfaceType::Unknown {
                report.unknown_surface_edges += 1;
            }
            report.dangling_node_references += [&edge.from_node_id, &edge.to_node_id]
                .into_iter()
                .filter(|node_id| graph.node(node_id).is_none())
                .count();
            if edge.geometry.0.len() < 2 {
                report.degenerate_geometry_edges += 1;
            }
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn log(&self) {
        if self.unknown_road_class_edges > 0 {
            warn!(
                "{} edges have an unmapped road class - using neutral defaults",
                self.unknown_road_class_edges
            );
        }
        if self.unknown_surface_edges > 0 {
            warn!(
                "{} edges have an unknown surface - using neutral defaults",
                self.unknown_surface_edges
            );
        }
        if self.dangling_node_references > 0 {
            warn!(
                "{} edge endpoints reference nodes missing from the graph",
                self.dangling_node_references
            );
        }
        if self.degenerate_geometry_edges > 0 {
            warn!(
                "{} edges have degenerate geometry - treating their bearings as 0",
                self.degenerate_geometry_edges
            );
        }
    }
}
