use hashbrown::{HashMap, HashSet};

use crate::model::{EdgeChain, StreetGraph};

/// Crossing situation of a connector chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CrossingProfile {
    pub crosses_major_road: bool,
    pub has_signal: bool,
    pub has_stop: bool,
}

impl CrossingProfile {
    /// Inspects every node the chain touches and the edges meeting there.
    ///
    /// `incoming` is the graph's reverse adjacency, see [`StreetGraph::incoming_index`].
    pub(crate) fn of_chain(
        chain: &EdgeChain,
        graph: &StreetGraph,
        incoming: &HashMap<&str, Vec<usize>>,
    ) -> Self {
        let members: HashSet<&str> = chain.member_edge_ids().map(String::as_str).collect();
        let mut profile = Self::default();
        let mut touched: HashSet<&str> = HashSet::new();

        for edge in chain.edge_ids.iter().filter_map(|id| graph.edge(id)) {
            let attrs = &edge.attributes;
            profile.crosses_major_road |= attrs.road_class.is_major();
            profile.has_signal |= attrs.signal_count.is_some_and(|count| count > 0);
            profile.has_stop |= attrs.stop_sign_count.is_some_and(|count| count > 0);

            touched.insert(edge.from_node_id.as_str());
            touched.insert(edge.to_node_id.as_str());
        }

        for node_id in touched {
            if let Some(node) = graph.node(node_id) {
                profile.has_signal |= node.has_signal;
                profile.has_stop |= node.has_stop_sign;
            }

            let meeting = graph
                .outgoing(node_id)
                .iter()
                .chain(incoming.get(node_id).into_iter().flatten());
            for &idx in meeting {
                let edge = graph.edge_at(idx);
                if !members.contains(edge.id.as_str()) && edge.attributes.road_class.is_major() {
                    profile.crosses_major_road = true;
                }
            }
        }

        profile
    }

    /// Difficulty in [0, 1] of getting through the connector
    pub(crate) fn difficulty(&self) -> f64 {
        crossing_difficulty(self.crosses_major_road, self.has_signal, self.has_stop)
    }
}

pub fn crossing_difficulty(crosses_major_road: bool, has_signal: bool, has_stop: bool) -> f64 {
    match (crosses_major_road, has_signal, has_stop) {
        (true, true, _) => 0.3,
        (true, false, true) => 0.5,
        (true, false, false) => 0.9,
        (false, true, _) | (false, _, true) => 0.1,
        (false, false, false) => 0.2,
    }
}
