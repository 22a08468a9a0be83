//! Immutable street graph snapshot consumed by corridor construction

use geo::LineString;
use hashbrown::HashMap;
use log::warn;

use super::{EdgeAttributes, StreetEdge, StreetNode};
use crate::{EdgeId, Error, NodeId};

pub const FORWARD_SUFFIX: &str = ":fwd";
pub const REVERSE_SUFFIX: &str = ":rev";

/// Id of the opposite logical edge of a bidirectional way, if `id` follows
/// the `<way>:fwd` / `<way>:rev` convention
pub fn paired_edge_id(id: &str) -> Option<EdgeId> {
    if let Some(way) = id.strip_suffix(FORWARD_SUFFIX) {
        Some(format!("{way}{REVERSE_SUFFIX}"))
    } else {
        id.strip_suffix(REVERSE_SUFFIX)
            .map(|way| format!("{way}{FORWARD_SUFFIX}"))
    }
}

/// Street graph: nodes keyed by id, edges in insertion ("native") order and
/// an ordered adjacency list of outgoing edges per node.
#[derive(Debug, Clone, Default)]
pub struct StreetGraph {
    nodes: HashMap<NodeId, StreetNode>,
    edges: Vec<StreetEdge>,
    edge_index: HashMap<EdgeId, usize>,
    adjacency: HashMap<NodeId, Vec<usize>>,
    twins: Vec<Option<usize>>,
}

impl StreetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a graph from externally produced parts.
    ///
    /// Adjacency entries referencing unknown edges, or edges that do not
    /// leave the listed node, are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if two edges share an id.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = StreetNode>,
        edges: impl IntoIterator<Item = StreetEdge>,
        adjacency: impl IntoIterator<Item = (NodeId, Vec<EdgeId>)>,
    ) -> Result<Self, Error> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.insert_edge(edge)?;
        }

        for (node_id, edge_ids) in adjacency {
            let mut outgoing = Vec::with_capacity(edge_ids.len());
            for edge_id in edge_ids {
                match graph.edge_index.get(&edge_id) {
                    Some(&idx) if graph.edges[idx].from_node_id == node_id => outgoing.push(idx),
                    Some(_) => {
                        warn!("Edge {edge_id} listed as leaving {node_id} but starts elsewhere");
                    }
                    None => warn!("Adjacency of {node_id} references unknown edge {edge_id}"),
                }
            }
            graph.adjacency.entry(node_id).or_default().extend(outgoing);
        }

        Ok(graph)
    }

    pub fn add_node(&mut self, node: StreetNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Adds an edge and appends it to the adjacency list of its start node.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge with the same id already exists.
    pub fn add_edge(&mut self, edge: StreetEdge) -> Result<usize, Error> {
        let from = edge.from_node_id.clone();
        let idx = self.insert_edge(edge)?;
        self.adjacency.entry(from).or_default().push(idx);
        Ok(idx)
    }

    /// Adds both logical edges (`<way>:fwd`, `<way>:rev`) of a two-way street.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is already taken.
    pub fn add_bidirectional_edge(
        &mut self,
        way_id: &str,
        from_node_id: impl Into<NodeId>,
        to_node_id: impl Into<NodeId>,
        geometry: LineString<f64>,
        mut attributes: EdgeAttributes,
    ) -> Result<(), Error> {
        attributes.is_oneway = false;
        let forward = StreetEdge::new(
            format!("{way_id}{FORWARD_SUFFIX}"),
            from_node_id,
            to_node_id,
            geometry,
            attributes,
        );
        let reverse = forward.reversed(format!("{way_id}{REVERSE_SUFFIX}"));
        self.add_edge(forward)?;
        self.add_edge(reverse)?;
        Ok(())
    }

    fn insert_edge(&mut self, edge: StreetEdge) -> Result<usize, Error> {
        if self.edge_index.contains_key(&edge.id) {
            return Err(Error::InvalidData(format!("Duplicate edge id {}", edge.id)));
        }
        let idx = self.edges.len();
        let twin = paired_edge_id(&edge.id).and_then(|pair| self.edge_index.get(&pair).copied());

        self.edge_index.insert(edge.id.clone(), idx);
        self.edges.push(edge);
        self.twins.push(twin);
        if let Some(twin) = twin {
            self.twins[twin] = Some(idx);
        }
        Ok(idx)
    }

    pub fn node(&self, id: &str) -> Option<&StreetNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StreetNode> {
        self.nodes.values()
    }

    pub fn edge(&self, id: &str) -> Option<&StreetEdge> {
        self.edge_index.get(id).map(|&idx| &self.edges[idx])
    }

    /// Edge by native index
    ///
    /// # Panics
    ///
    /// If `idx` is out of bounds
    pub fn edge_at(&self, idx: usize) -> &StreetEdge {
        &self.edges[idx]
    }

    /// All edges in native order
    pub fn edges(&self) -> &[StreetEdge] {
        &self.edges
    }

    pub fn index_of(&self, edge_id: &str) -> Option<usize> {
        self.edge_index.get(edge_id).copied()
    }

    /// Native indices of edges leaving `node_id`, in adjacency-list order
    pub fn outgoing(&self, node_id: &str) -> &[usize] {
        self.adjacency
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Node id -> native indices of edges ending at that node, in native order
    pub fn incoming_index(&self) -> HashMap<&str, Vec<usize>> {
        let mut incoming: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, edge) in self.edges.iter().enumerate() {
            incoming.entry(edge.to_node_id.as_str()).or_default().push(idx);
        }
        incoming
    }

    /// Opposite logical edge of a bidirectional way
    pub fn twin_of(&self, idx: usize) -> Option<usize> {
        self.twins.get(idx).copied().flatten()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
