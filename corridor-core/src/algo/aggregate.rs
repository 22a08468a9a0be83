//! Length-weighted reduction of per-edge attributes into corridor attributes

use hashbrown::HashSet;

use super::geometry::angle_difference;
use crate::EdgeId;
use crate::model::{CorridorAttributes, RoadClass, StreetEdge, StreetGraph, SurfaceType};

/// Junction bearing change, in degrees, above which a turn is counted
pub const TURN_THRESHOLD_DEGREES: f64 = 30.0;

/// Running length total per key, remembering first-insertion order
#[derive(Debug)]
pub(crate) struct LengthTally<K> {
    entries: Vec<(K, f64)>,
}

impl<K: PartialEq> LengthTally<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K, length: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, total)) => *total += length,
            None => self.entries.push((key, length)),
        }
    }

    /// Key with the greatest total; ties keep the earliest inserted key
    pub(crate) fn predominant(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (key, total) in &self.entries {
            if best.is_none_or(|(_, best_total)| *total > best_total) {
                best = Some((key, *total));
            }
        }
        best
    }
}

/// Resolves edge ids against the graph, skipping unknown ids
pub(crate) fn resolve_edges<'g>(
    edge_ids: &[EdgeId],
    graph: &'g StreetGraph,
) -> Vec<&'g StreetEdge> {
    edge_ids.iter().filter_map(|id| graph.edge(id)).collect()
}

fn fraction(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total } else { 0.0 }
}

/// Aggregates a chain's edges into [`CorridorAttributes`]
pub fn aggregate_attributes(edge_ids: &[EdgeId], graph: &StreetGraph) -> CorridorAttributes {
    let edges = resolve_edges(edge_ids, graph);

    let mut length_meters = 0.0;
    let mut classes: LengthTally<RoadClass> = LengthTally::new();
    let mut surfaces: LengthTally<SurfaceType> = LengthTally::new();
    let mut weighted_confidence = 0.0;
    let mut bicycle_infra = 0.0;
    let mut pedestrian_path = 0.0;
    let mut separation = 0.0;
    let mut traffic_calming = 0.0;
    let mut weighted_speed = 0.0;
    let mut speed_length = 0.0;
    let mut speed_sum = 0.0;
    let mut speed_count = 0usize;

    for edge in &edges {
        let attrs = &edge.attributes;
        let length = attrs.length_meters;
        length_meters += length;

        classes.add(attrs.road_class, length);
        surfaces.add(attrs.surface.surface, length);
        weighted_confidence += attrs.surface.confidence * length;

        if attrs.has_bicycle_infra {
            bicycle_infra += length;
        }
        if attrs.is_pedestrian_path {
            pedestrian_path += length;
        }
        if attrs.is_separated {
            separation += length;
        }
        if attrs.has_traffic_calming {
            traffic_calming += length;
        }
        if let Some(speed) = attrs.speed_limit_kmh {
            weighted_speed += speed * length;
            speed_length += length;
            speed_sum += speed;
            speed_count += 1;
        }
    }

    // Zero-length edges carry no weight; fall back to the plain mean
    let average_speed_limit = (speed_count > 0).then(|| {
        if speed_length > 0.0 {
            weighted_speed / speed_length
        } else {
            speed_sum / speed_count as f64
        }
    });

    CorridorAttributes {
        length_meters,
        predominant_road_class: classes.predominant().map_or(RoadClass::Other, |(class, _)| *class),
        predominant_surface: surfaces
            .predominant()
            .map_or(SurfaceType::Unknown, |(surface, _)| *surface),
        surface_confidence: fraction(weighted_confidence, length_meters),
        bicycle_infra_continuity: fraction(bicycle_infra, length_meters),
        pedestrian_path_continuity: fraction(pedestrian_path, length_meters),
        separation_continuity: fraction(separation, length_meters),
        traffic_calming_continuity: fraction(traffic_calming, length_meters),
        stop_density_per_km: stop_density_per_km(&edges, graph, length_meters),
        turns_count: count_turns(&edges),
        average_speed_limit,
    }
}

/// Consecutive edge pairs whose junction bearing change exceeds the turn threshold
pub fn count_turns(edges: &[&StreetEdge]) -> usize {
    edges
        .windows(2)
        .filter(|pair| {
            angle_difference(pair[0].exit_bearing(), pair[1].entry_bearing())
                > TURN_THRESHOLD_DEGREES
        })
        .count()
}

/// Distinct stop-sign/signal nodes touched by the chain per km of chain length
fn stop_density_per_km(edges: &[&StreetEdge], graph: &StreetGraph, length_meters: f64) -> f64 {
    if length_meters <= 0.0 {
        return 0.0;
    }
    let touched: HashSet<&str> = edges
        .iter()
        .flat_map(|edge| [edge.from_node_id.as_str(), edge.to_node_id.as_str()])
        .collect();
    let controlled = touched
        .into_iter()
        .filter_map(|node_id| graph.node(node_id))
        .filter(|node| node.is_controlled())
        .count();

    controlled as f64 / (length_meters / 1000.0)
}

/// Name with the greatest accumulated length; `None` if no edge is named
pub fn derive_name(edge_ids: &[EdgeId], graph: &StreetGraph) -> Option<String> {
    let mut names: LengthTally<&str> = LengthTally::new();
    for edge in resolve_edges(edge_ids, graph) {
        if let Some(name) = edge.attributes.name.as_deref().filter(|name| !name.is_empty()) {
            names.add(name, edge.length_meters());
        }
    }
    names.predominant().map(|(name, _)| (*name).to_string())
}
