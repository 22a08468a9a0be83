//! Splitting the street graph into edge-disjoint connected components

use hashbrown::HashMap;
use petgraph::unionfind::UnionFind;

use crate::model::StreetGraph;

/// Groups edge indices by weakly connected component.
///
/// Components are ordered by their first edge in native order, and edges
/// keep native order within a component.
pub fn connected_components(graph: &StreetGraph) -> Vec<Vec<usize>> {
    let mut node_slots: HashMap<&str, usize> = HashMap::new();
    let mut endpoints = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        let next = node_slots.len();
        let from = *node_slots.entry(edge.from_node_id.as_str()).or_insert(next);
        let next = node_slots.len();
        let to = *node_slots.entry(edge.to_node_id.as_str()).or_insert(next);
        endpoints.push((from, to));
    }

    let mut sets = UnionFind::<usize>::new(node_slots.len());
    for &(from, to) in &endpoints {
        sets.union(from, to);
    }

    let mut component_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    for (edge_idx, &(from, _)) in endpoints.iter().enumerate() {
        let root = sets.find(from);
        let component = *component_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[component].push(edge_idx);
    }

    components
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;
    use crate::model::{EdgeAttributes, StreetEdge};

    fn edge(id: &str, from: &str, to: &str) -> StreetEdge {
        StreetEdge::new(
            id,
            from,
            to,
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.001)],
            EdgeAttributes::default(),
        )
    }

    #[test]
    fn test_components_in_native_order() {
        let mut graph = StreetGraph::new();
        graph.add_edge(edge("e0", "a", "b")).unwrap();
        graph.add_edge(edge("e1", "x", "y")).unwrap();
        graph.add_edge(edge("e2", "c", "b")).unwrap();
        graph.add_edge(edge("e3", "y", "z")).unwrap();

        assert_eq!(connected_components(&graph), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn test_no_edges_no_components() {
        assert!(connected_components(&StreetGraph::new()).is_empty());
    }
}
