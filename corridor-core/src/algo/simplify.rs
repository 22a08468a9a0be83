//! Corridor display geometry: concatenation and Douglas-Peucker simplification

use geo::{Coord, LineString};

use super::geometry::perpendicular_distance_meters;
use crate::EdgeId;
use crate::model::StreetGraph;

/// Concatenates edge geometries in order, dropping a junction point when an
/// edge starts exactly where the previous one ended. Unknown edge ids are skipped.
pub fn concatenate_geometry(edge_ids: &[EdgeId], graph: &StreetGraph) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for edge in edge_ids.iter().filter_map(|id| graph.edge(id)) {
        let mut points = edge.geometry.0.iter();
        if let (Some(last), Some(first)) = (coords.last(), edge.geometry.0.first())
            && last == first
        {
            points.next();
        }
        coords.extend(points);
    }
    coords
}

/// Simplified display geometry of a chain
pub fn simplify_chain_geometry(
    edge_ids: &[EdgeId],
    graph: &StreetGraph,
    tolerance_meters: f64,
) -> LineString<f64> {
    let coords = concatenate_geometry(edge_ids, graph);
    if coords.len() <= 2 {
        return LineString::new(coords);
    }
    LineString::new(douglas_peucker(&coords, tolerance_meters))
}

/// Douglas-Peucker simplification with a tolerance in meters.
///
/// Endpoints are always kept. Inputs of two points or fewer are returned as a copy.
pub fn douglas_peucker(points: &[Coord<f64>], tolerance_meters: f64) -> Vec<Coord<f64>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let start = points[0];
    let end = points[points.len() - 1];

    let mut max_distance = 0.0;
    let mut split = 0;
    for (idx, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = perpendicular_distance_meters(*point, start, end);
        if distance > max_distance {
            max_distance = distance;
            split = idx;
        }
    }

    if max_distance > tolerance_meters {
        let mut left = douglas_peucker(&points[..=split], tolerance_meters);
        let right = douglas_peucker(&points[split..], tolerance_meters);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![start, end]
    }
}
