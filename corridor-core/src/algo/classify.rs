//! Tier classification and the effective minimum corridor length

use log::trace;

use super::aggregate::{LengthTally, resolve_edges};
use super::compatibility::chain_homogeneity;
use crate::EdgeId;
use crate::building::{CorridorBuilderOptions, TierThresholds};
use crate::model::{CorridorType, StreetEdge, StreetGraph};

/// Share of chain length a condition must strictly exceed to be the majority
pub const MAJORITY_SHARE: f64 = 0.5;
/// Single-name share from which the name-continuity bonus applies
pub const NAME_COVERAGE_CUTOFF: f64 = 0.8;
/// Threshold multiplier for chains with strong name continuity
pub const NAME_CONTINUITY_FACTOR: f64 = 0.5;
/// Homogeneity below which the threshold is inflated by `1 / homogeneity`
pub const HOMOGENEITY_CUTOFF: f64 = 0.7;

/// Outcome of classifying one chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub corridor_type: CorridorType,
    /// Tier threshold before adjustments
    pub base_min_length: f64,
    /// Threshold the chain length must reach to become a corridor
    pub effective_min_length: f64,
    pub homogeneity: f64,
    /// Share of chain length carrying the most common name
    pub name_coverage: f64,
}

impl Classification {
    pub fn qualifies(&self, length_meters: f64) -> bool {
        length_meters >= self.effective_min_length
    }
}

/// Classifies a chain and computes its effective minimum length
pub fn classify_chain(
    edge_ids: &[EdgeId],
    graph: &StreetGraph,
    options: &CorridorBuilderOptions,
) -> Classification {
    let edges = resolve_edges(edge_ids, graph);
    classify_edges(&edges, &options.tier_thresholds(), options)
}

pub(crate) fn classify_edges(
    edges: &[&StreetEdge],
    thresholds: &TierThresholds,
    options: &CorridorBuilderOptions,
) -> Classification {
    let corridor_type = classify_tier(edges);
    let base_min_length = thresholds.for_type(corridor_type);
    let homogeneity = chain_homogeneity(edges, &options.compatibility_weights);
    let name_coverage = name_coverage(edges);
    let effective_min_length = effective_min_length(base_min_length, name_coverage, homogeneity);

    trace!(
        "Classified chain of {} edges as {corridor_type:?}: base {base_min_length}, \
         name coverage {name_coverage:.2}, homogeneity {homogeneity:.2} -> {effective_min_length}",
        edges.len()
    );

    Classification {
        corridor_type,
        base_min_length,
        effective_min_length,
        homogeneity,
        name_coverage,
    }
}

/// Tier from length shares of dedicated infrastructure, names and bicycle infrastructure
pub fn classify_tier(edges: &[&StreetEdge]) -> CorridorType {
    let mut total = 0.0;
    let mut dedicated = 0.0;
    let mut bike_infra = 0.0;
    let mut named = 0.0;

    for edge in edges {
        let attrs = &edge.attributes;
        let length = attrs.length_meters;
        total += length;
        if attrs.is_dedicated_infra() {
            dedicated += length;
        }
        if attrs.has_bicycle_infra {
            bike_infra += length;
        }
        if attrs.has_name() {
            named += length;
        }
    }

    if total <= 0.0 {
        return CorridorType::Unnamed;
    }

    let is_majority = |length: f64| length / total > MAJORITY_SHARE;
    if is_majority(dedicated) {
        CorridorType::DedicatedInfra
    } else if is_majority(named) && is_majority(bike_infra) {
        CorridorType::NamedBikeInfra
    } else if is_majority(named) {
        CorridorType::NamedRoad
    } else {
        CorridorType::Unnamed
    }
}

/// Share of total length carrying the single most common name
pub fn name_coverage(edges: &[&StreetEdge]) -> f64 {
    let mut names: LengthTally<&str> = LengthTally::new();
    let mut total = 0.0;
    for edge in edges {
        total += edge.length_meters();
        if let Some(name) = edge.attributes.name.as_deref().filter(|name| !name.is_empty()) {
            names.add(name, edge.length_meters());
        }
    }

    match names.predominant() {
        Some((_, length)) if total > 0.0 => length / total,
        _ => 0.0,
    }
}

/// Base threshold halved for strong name continuity, then divided by
/// homogeneity when the chain is heterogeneous
pub fn effective_min_length(base: f64, name_coverage: f64, homogeneity: f64) -> f64 {
    let mut threshold = base;
    if name_coverage >= NAME_COVERAGE_CUTOFF {
        threshold *= NAME_CONTINUITY_FACTOR;
    }
    if homogeneity < HOMOGENEITY_CUTOFF {
        if homogeneity <= 0.0 {
            return f64::INFINITY;
        }
        threshold *= 1.0 / homogeneity;
    }
    threshold
}
