//! Similarity of neighbouring edges

use crate::building::CompatibilityWeights;
use crate::model::{EdgeAttributes, StreetEdge};

/// Weighted similarity of two edges in `[0, 1]`.
///
/// Components: road-class group match, surface agreement (1 for the same
/// type, 0.5 for the same paved/unpaved family) and agreement of the
/// bicycle-infra / pedestrian-path / separation flags.
pub fn edge_compatibility(
    a: &EdgeAttributes,
    b: &EdgeAttributes,
    weights: &CompatibilityWeights,
) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let class_score = if a.road_class.group() == b.road_class.group() {
        1.0
    } else {
        0.0
    };

    let surface_score = if a.surface.surface == b.surface.surface {
        1.0
    } else {
        match (a.surface.surface.is_paved(), b.surface.surface.is_paved()) {
            (Some(x), Some(y)) if x == y => 0.5,
            _ => 0.0,
        }
    };

    let flags = [
        a.has_bicycle_infra == b.has_bicycle_infra,
        a.is_pedestrian_path == b.is_pedestrian_path,
        a.is_separated == b.is_separated,
    ];
    let infra_score = flags.iter().filter(|&&agree| agree).count() as f64 / flags.len() as f64;

    (weights.road_class * class_score
        + weights.surface * surface_score
        + weights.infrastructure * infra_score)
        / total
}

/// Mean compatibility over consecutive edge pairs; 1.0 for fewer than two edges
pub fn chain_homogeneity(edges: &[&StreetEdge], weights: &CompatibilityWeights) -> f64 {
    if edges.len() < 2 {
        return 1.0;
    }
    let sum: f64 = edges
        .windows(2)
        .map(|pair| edge_compatibility(&pair[0].attributes, &pair[1].attributes, weights))
        .sum();
    sum / (edges.len() - 1) as f64
}
