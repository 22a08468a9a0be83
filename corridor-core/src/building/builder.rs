use geo::LineString;
use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info, trace};
use rayon::prelude::*;

use super::config::{CorridorBuilderOptions, TierThresholds};
use super::connectors::CrossingProfile;
use crate::algo::aggregate::{aggregate_attributes, derive_name, resolve_edges};
use crate::algo::chains::{build_chains, build_chains_par};
use crate::algo::classify::{Classification, classify_edges};
use crate::algo::simplify::simplify_chain_geometry;
use crate::model::{
    Connector, Corridor, CorridorAttributes, CorridorNetwork, DataQualityReport, EdgeChain,
    StreetGraph,
};
use crate::{EntityId, Error, NodeId};

/// Builds the corridor network of a street graph
///
/// Chains are built in the graph's native edge order, then each chain is
/// promoted to a corridor or kept as a connector.
///
/// # Errors
///
/// Returns an error if `options` are invalid
pub fn build_corridor_network(
    graph: &StreetGraph,
    options: &CorridorBuilderOptions,
) -> Result<CorridorNetwork, Error> {
    options.validate()?;
    info!(
        "Building corridor network from {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let chains = build_chains(graph, options);
    let thresholds = options.tier_thresholds();
    let summaries: Vec<ChainSummary> = chains
        .into_iter()
        .map(|chain| ChainSummary::new(chain, graph, &thresholds, options))
        .collect();

    Ok(assemble_network(graph, summaries))
}

/// Same result as [`build_corridor_network`], with chains built per
/// connected component and summarised on the rayon thread pool
///
/// # Errors
///
/// Returns an error if `options` are invalid
pub fn build_corridor_network_par(
    graph: &StreetGraph,
    options: &CorridorBuilderOptions,
) -> Result<CorridorNetwork, Error> {
    options.validate()?;
    info!(
        "Building corridor network in parallel from {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let chains = build_chains_par(graph, options);
    let thresholds = options.tier_thresholds();
    let summaries: Vec<ChainSummary> = chains
        .into_par_iter()
        .map(|chain| ChainSummary::new(chain, graph, &thresholds, options))
        .collect();

    Ok(assemble_network(graph, summaries))
}

/// Per-chain results needed to promote or demote it
struct ChainSummary {
    chain: EdgeChain,
    classification: Classification,
    attributes: CorridorAttributes,
    geometry: LineString<f64>,
}

impl ChainSummary {
    fn new(
        chain: EdgeChain,
        graph: &StreetGraph,
        thresholds: &TierThresholds,
        options: &CorridorBuilderOptions,
    ) -> Self {
        let edges = resolve_edges(&chain.edge_ids, graph);
        let classification = classify_edges(&edges, thresholds, options);
        let attributes = aggregate_attributes(&chain.edge_ids, graph);
        let geometry =
            simplify_chain_geometry(&chain.edge_ids, graph, options.simplify_tolerance_meters);

        Self {
            chain,
            classification,
            attributes,
            geometry,
        }
    }

    fn is_corridor(&self) -> bool {
        self.classification.qualifies(self.chain.total_length_meters)
    }
}

fn assemble_network(graph: &StreetGraph, summaries: Vec<ChainSummary>) -> CorridorNetwork {
    let data_quality = DataQualityReport::from_graph(graph);
    data_quality.log();

    let chain_count = summaries.len();
    let incoming = graph.incoming_index();
    let mut network = CorridorNetwork {
        data_quality,
        ..CorridorNetwork::default()
    };
    // Node id -> entities starting or ending there, in chain order
    let mut entities_at_node: HashMap<String, Vec<EntityId>> = HashMap::new();

    for summary in summaries {
        let id = if summary.is_corridor() {
            let id = format!("corridor-{}", network.corridors.len());
            let corridor = promote(id.clone(), summary, graph);
            trace!(
                "{id}: {:?} over {} edges, {:.0} m",
                corridor.corridor_type,
                corridor.edge_ids.len(),
                corridor.attributes.length_meters
            );
            register_endpoints(&mut entities_at_node, &id, corridor.endpoints());
            network.corridors.insert(id.clone(), corridor);
            id
        } else {
            let id = format!("connector-{}", network.connectors.len());
            let connector = demote(id.clone(), summary, graph, &incoming);
            register_endpoints(&mut entities_at_node, &id, connector.endpoints());
            network.connectors.insert(id.clone(), connector);
            id
        };
        trace!("Chain assembled as {id}");
    }

    for entities in entities_at_node.values() {
        for (a, b) in entities.iter().tuple_combinations() {
            network.link(a, b);
        }
    }

    for connector in network.connectors.values_mut() {
        connector.corridor_ids = network
            .adjacency
            .get(&connector.id)
            .into_iter()
            .flatten()
            .filter(|neighbor| network.corridors.contains_key(neighbor.as_str()))
            .cloned()
            .collect();
    }

    let isolated = network
        .corridors
        .keys()
        .filter(|id| !network.adjacency.contains_key(id.as_str()))
        .count();
    debug!("{isolated} corridors have no neighbouring corridor or connector");

    info!(
        "Built {} corridors and {} connectors from {chain_count} chains",
        network.corridor_count(),
        network.connector_count()
    );
    network
}

fn register_endpoints(
    entities_at_node: &mut HashMap<String, Vec<EntityId>>,
    id: &str,
    [start_node_id, end_node_id]: [&NodeId; 2],
) {
    entities_at_node
        .entry(start_node_id.clone())
        .or_default()
        .push(id.to_string());
    if end_node_id != start_node_id {
        entities_at_node
            .entry(end_node_id.clone())
            .or_default()
            .push(id.to_string());
    }
}

fn promote(id: EntityId, summary: ChainSummary, graph: &StreetGraph) -> Corridor {
    let ChainSummary {
        chain,
        classification,
        attributes,
        geometry,
    } = summary;

    let edges = resolve_edges(&chain.edge_ids, graph);
    let is_oneway = !edges.is_empty() && edges.iter().all(|edge| edge.attributes.is_oneway);

    Corridor {
        id,
        name: derive_name(&chain.edge_ids, graph),
        corridor_type: classification.corridor_type,
        attributes,
        edge_ids: chain.edge_ids,
        start_node_id: chain.start_node_id,
        end_node_id: chain.end_node_id,
        geometry,
        is_oneway,
        scores: HashMap::new(),
    }
}

fn demote(
    id: EntityId,
    summary: ChainSummary,
    graph: &StreetGraph,
    incoming: &HashMap<&str, Vec<usize>>,
) -> Connector {
    let crossing = CrossingProfile::of_chain(&summary.chain, graph, incoming);
    let ChainSummary {
        chain, geometry, ..
    } = summary;

    Connector {
        id,
        edge_ids: chain.edge_ids,
        start_node_id: chain.start_node_id,
        end_node_id: chain.end_node_id,
        length_meters: chain.total_length_meters,
        corridor_ids: Vec::new(),
        crosses_major_road: crossing.crosses_major_road,
        has_signal: crossing.has_signal,
        has_stop: crossing.has_stop,
        crossing_difficulty: crossing.difficulty(),
        geometry,
    }
}
