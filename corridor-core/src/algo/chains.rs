//! Growing direction-continuous edge chains out of the street graph

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::{debug, info};
use rayon::prelude::*;

use super::compatibility::edge_compatibility;
use super::components::connected_components;
use super::geometry::angle_difference;
use crate::building::{CompatibilityWeights, CorridorBuilderOptions};
use crate::model::{EdgeChain, StreetGraph};

/// Lowest compatibility score at which a candidate may continue a chain
pub const MIN_CONTINUATION_SCORE: f64 = 0.5;

/// Edges already claimed by a chain during one build.
///
/// Covers either the whole graph or a single component; edges outside the
/// covered subset report as visited so they are never traversed.
pub(crate) struct VisitedEdges {
    bits: FixedBitSet,
    slots: Option<HashMap<usize, usize>>,
}

impl VisitedEdges {
    pub(crate) fn for_graph(edge_count: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(edge_count),
            slots: None,
        }
    }

    pub(crate) fn for_subset(edges: &[usize]) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(edges.len()),
            slots: Some(edges.iter().enumerate().map(|(slot, &edge)| (edge, slot)).collect()),
        }
    }

    fn slot(&self, edge: usize) -> Option<usize> {
        match &self.slots {
            Some(slots) => slots.get(&edge).copied(),
            None => (edge < self.bits.len()).then_some(edge),
        }
    }

    pub(crate) fn contains(&self, edge: usize) -> bool {
        self.slot(edge).is_none_or(|slot| self.bits.contains(slot))
    }

    pub(crate) fn insert(&mut self, edge: usize) {
        if let Some(slot) = self.slot(edge) {
            self.bits.insert(slot);
        }
    }
}

/// Chain builder over one graph snapshot
pub struct ChainBuilder<'a> {
    graph: &'a StreetGraph,
    max_angle_change: f64,
    weights: CompatibilityWeights,
    /// Node id -> native indices of edges ending there, in native order
    incoming: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(graph: &'a StreetGraph, options: &CorridorBuilderOptions) -> Self {
        Self {
            graph,
            max_angle_change: options.max_angle_change,
            weights: options.compatibility_weights,
            incoming: graph.incoming_index(),
        }
    }

    /// Builds chains from `seeds` (native indices, in native order),
    /// returning each chain with the index of the edge that started it.
    pub(crate) fn build_from_seeds(
        &self,
        seeds: &[usize],
        visited: &mut VisitedEdges,
    ) -> Vec<(usize, EdgeChain)> {
        let mut chains = Vec::new();

        for &seed in seeds {
            if visited.contains(seed) {
                continue;
            }
            self.claim(seed, visited);

            let mut chain = VecDeque::from([seed]);
            self.extend_forward(&mut chain, visited);
            self.extend_backward(&mut chain, visited);

            chains.push((seed, self.to_edge_chain(chain)));
        }

        chains
    }

    /// Marks an edge and its bidirectional twin as visited
    fn claim(&self, edge: usize, visited: &mut VisitedEdges) {
        visited.insert(edge);
        if let Some(twin) = self.graph.twin_of(edge) {
            visited.insert(twin);
        }
    }

    fn extend_forward(&self, chain: &mut VecDeque<usize>, visited: &mut VisitedEdges) {
        while let Some(&last_idx) = chain.back() {
            let last = self.graph.edge_at(last_idx);
            let exit = last.exit_bearing();

            let mut best: Option<(usize, f64)> = None;
            for &candidate_idx in self.graph.outgoing(&last.to_node_id) {
                if visited.contains(candidate_idx) {
                    continue;
                }
                let candidate = self.graph.edge_at(candidate_idx);
                if angle_difference(exit, candidate.entry_bearing()) > self.max_angle_change {
                    continue;
                }
                let score =
                    edge_compatibility(&last.attributes, &candidate.attributes, &self.weights);
                // Strict comparison: the first candidate in adjacency order wins ties
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((candidate_idx, score));
                }
            }

            match best {
                Some((next, score)) if score >= MIN_CONTINUATION_SCORE => {
                    self.claim(next, visited);
                    chain.push_back(next);
                }
                _ => break,
            }
        }
    }

    fn extend_backward(&self, chain: &mut VecDeque<usize>, visited: &mut VisitedEdges) {
        while let Some(&first_idx) = chain.front() {
            let first = self.graph.edge_at(first_idx);
            let entry = first.entry_bearing();

            let mut best: Option<(usize, f64)> = None;
            let candidates = self
                .incoming
                .get(first.from_node_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            for &candidate_idx in candidates {
                if visited.contains(candidate_idx) {
                    continue;
                }
                let candidate = self.graph.edge_at(candidate_idx);
                if angle_difference(candidate.exit_bearing(), entry) > self.max_angle_change {
                    continue;
                }
                let score =
                    edge_compatibility(&candidate.attributes, &first.attributes, &self.weights);
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((candidate_idx, score));
                }
            }

            match best {
                Some((previous, score)) if score >= MIN_CONTINUATION_SCORE => {
                    self.claim(previous, visited);
                    chain.push_front(previous);
                }
                _ => break,
            }
        }
    }

    fn to_edge_chain(&self, chain: VecDeque<usize>) -> EdgeChain {
        let first = self.graph.edge_at(chain[0]);
        let last = self.graph.edge_at(chain[chain.len() - 1]);

        EdgeChain {
            edge_ids: chain.iter().map(|&idx| self.graph.edge_at(idx).id.clone()).collect(),
            paired_edge_ids: chain
                .iter()
                .filter_map(|&idx| self.graph.twin_of(idx))
                .map(|twin| self.graph.edge_at(twin).id.clone())
                .collect(),
            start_node_id: first.from_node_id.clone(),
            end_node_id: last.to_node_id.clone(),
            total_length_meters: chain
                .iter()
                .map(|&idx| self.graph.edge_at(idx).length_meters())
                .sum(),
        }
    }
}

/// Partitions every edge of `graph` into chains.
///
/// Edges are visited in native order; each unvisited edge seeds a chain that
/// is extended forward, then backward. Deterministic for a given graph.
pub fn build_chains(graph: &StreetGraph, options: &CorridorBuilderOptions) -> Vec<EdgeChain> {
    let builder = ChainBuilder::new(graph, options);
    let seeds: Vec<usize> = (0..graph.edge_count()).collect();
    let mut visited = VisitedEdges::for_graph(graph.edge_count());

    let chains: Vec<EdgeChain> = builder
        .build_from_seeds(&seeds, &mut visited)
        .into_iter()
        .map(|(_, chain)| chain)
        .collect();

    info!(
        "Built {} chains from {} edges",
        chains.len(),
        graph.edge_count()
    );
    chains
}

/// Same result as [`build_chains`], computed per connected component in parallel.
///
/// Each component owns its visited set; chains are merged back in the order
/// of their seed edges.
pub fn build_chains_par(graph: &StreetGraph, options: &CorridorBuilderOptions) -> Vec<EdgeChain> {
    let builder = ChainBuilder::new(graph, options);
    let components = connected_components(graph);
    debug!("Building chains over {} components", components.len());

    let mut seeded: Vec<(usize, EdgeChain)> = components
        .par_iter()
        .flat_map_iter(|component| {
            let mut visited = VisitedEdges::for_subset(component);
            builder.build_from_seeds(component, &mut visited)
        })
        .collect();
    seeded.sort_unstable_by_key(|(seed, _)| *seed);

    let chains: Vec<EdgeChain> = seeded.into_iter().map(|(_, chain)| chain).collect();
    info!(
        "Built {} chains from {} edges",
        chains.len(),
        graph.edge_count()
    );
    chains
}
