use std::collections::HashSet;

use corridor_core::algo::aggregate_attributes;
use corridor_core::algo::geometry::angle_difference;
use corridor_core::model::paired_edge_id;
use corridor_core::prelude::*;
use geo::{LineString, Point, Rect, coord};

const STEP: f64 = 0.001;

/// Builder for small hand-drawn graphs; nodes are placed on a 0.001° lattice
struct GraphSketch {
    graph: StreetGraph,
}

impl GraphSketch {
    fn new(nodes: &[(&str, f64, f64)]) -> Self {
        let mut graph = StreetGraph::new();
        for &(id, col, row) in nodes {
            graph.add_node(StreetNode::new(id, col * STEP, row * STEP));
        }
        Self { graph }
    }

    fn line(&self, from: &str, to: &str) -> LineString<f64> {
        let a = self.graph.node(from).unwrap().geometry;
        let b = self.graph.node(to).unwrap().geometry;
        LineString::new(vec![coord! { x: a.x(), y: a.y() }, coord! { x: b.x(), y: b.y() }])
    }

    fn one_way(mut self, id: &str, from: &str, to: &str, attributes: EdgeAttributes) -> Self {
        let geometry = self.line(from, to);
        self.graph
            .add_edge(StreetEdge::new(id, from, to, geometry, attributes))
            .unwrap();
        self
    }

    fn two_way(mut self, way: &str, from: &str, to: &str, attributes: EdgeAttributes) -> Self {
        let geometry = self.line(from, to);
        self.graph
            .add_bidirectional_edge(way, from, to, geometry, attributes)
            .unwrap();
        self
    }
}

fn residential(length: f64) -> EdgeAttributes {
    EdgeAttributes::new(RoadClass::Residential, length)
}

fn chain_ids(chains: &[EdgeChain]) -> Vec<Vec<&str>> {
    chains
        .iter()
        .map(|chain| chain.edge_ids.iter().map(String::as_str).collect())
        .collect()
}

/// Grid with mixed classes, one-way rows and two-way columns
fn mixed_grid(size: usize) -> StreetGraph {
    let mut graph = StreetGraph::new();
    let id = |row: usize, col: usize| format!("n{row}_{col}");
    for row in 0..size {
        for col in 0..size {
            graph.add_node(StreetNode::new(id(row, col), col as f64 * STEP, row as f64 * STEP));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let (x, y) = (col as f64 * STEP, row as f64 * STEP);
            if col + 1 < size {
                let mut attributes = if row % 3 == 0 {
                    EdgeAttributes::new(RoadClass::Cycleway, 111.0)
                } else {
                    residential(111.0)
                };
                attributes.is_oneway = row % 2 == 1;
                let geometry =
                    LineString::new(vec![coord! { x: x, y: y }, coord! { x: x + STEP, y: y }]);
                if attributes.is_oneway {
                    graph
                        .add_edge(StreetEdge::new(
                            format!("h{row}_{col}"),
                            id(row, col),
                            id(row, col + 1),
                            geometry,
                            attributes,
                        ))
                        .unwrap();
                } else {
                    graph
                        .add_bidirectional_edge(
                            &format!("h{row}_{col}"),
                            id(row, col),
                            id(row, col + 1),
                            geometry,
                            attributes,
                        )
                        .unwrap();
                }
            }
            if row + 1 < size {
                graph
                    .add_bidirectional_edge(
                        &format!("v{row}_{col}"),
                        id(row, col),
                        id(row + 1, col),
                        LineString::new(vec![coord! { x: x, y: y }, coord! { x: x, y: y + STEP }]),
                        EdgeAttributes {
                            name: Some(format!("Avenue {col}")),
                            ..EdgeAttributes::new(RoadClass::Tertiary, 111.0)
                        },
                    )
                    .unwrap();
            }
        }
    }
    graph
}

#[test]
fn straight_run_is_one_chain() {
    let graph = GraphSketch::new(&[
        ("a", 0.0, 0.0),
        ("b", 1.0, 0.0),
        ("c", 2.0, 0.0),
        ("d", 3.0, 0.0),
    ])
        .one_way("e1", "a", "b", residential(100.0))
        .one_way("e2", "b", "c", residential(100.0))
        .one_way("e3", "c", "d", residential(100.0))
        .graph;

    let chains = build_chains(&graph, &CorridorBuilderOptions::default());
    assert_eq!(chain_ids(&chains), vec![vec!["e1", "e2", "e3"]]);
    assert_eq!(chains[0].total_length_meters, 300.0);
    assert_eq!(chains[0].start_node_id, "a");
    assert_eq!(chains[0].end_node_id, "d");
}

#[test]
fn side_street_at_right_angle_starts_its_own_chain() {
    let graph = GraphSketch::new(&[
        ("a", 0.0, 0.0),
        ("b", 1.0, 0.0),
        ("c", 2.0, 0.0),
        ("s", 1.0, 1.0),
    ])
        .one_way("e1", "a", "b", residential(100.0))
        .one_way("e2", "b", "c", residential(100.0))
        .one_way("side", "b", "s", residential(100.0))
        .graph;

    let chains = build_chains(&graph, &CorridorBuilderOptions::default());
    assert_eq!(chain_ids(&chains), vec![vec!["e1", "e2"], vec!["side"]]);
}

#[test]
fn empty_graph_builds_empty_network() {
    let graph = StreetGraph::new();
    assert!(build_chains(&graph, &CorridorBuilderOptions::default()).is_empty());

    let network = build_corridor_network(&graph, &CorridorBuilderOptions::default()).unwrap();
    assert!(network.is_empty());
    assert!(network.adjacency.is_empty());
    assert!(network.data_quality.is_clean());
}

#[test]
fn class_change_splits_chain() {
    let graph = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0)])
        .one_way("street", "a", "b", residential(100.0))
        .one_way("track", "b", "c", EdgeAttributes::new(RoadClass::Cycleway, 100.0))
        .graph;

    let chains = build_chains(&graph, &CorridorBuilderOptions::default());
    assert_eq!(chain_ids(&chains), vec![vec!["street"], vec!["track"]]);
}

#[test]
fn one_way_edges_follow_flow_direction() {
    let one_way = || EdgeAttributes {
        is_oneway: true,
        ..residential(100.0)
    };

    let continuing = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0)])
        .one_way("e1", "a", "b", one_way())
        .one_way("e2", "b", "c", one_way())
        .graph;
    let chains = build_chains(&continuing, &CorridorBuilderOptions::default());
    assert_eq!(chain_ids(&chains), vec![vec!["e1", "e2"]]);

    let converging = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0)])
        .one_way("e1", "a", "b", one_way())
        .one_way("e2", "c", "b", one_way())
        .graph;
    let chains = build_chains(&converging, &CorridorBuilderOptions::default());
    assert_eq!(chain_ids(&chains), vec![vec!["e1"], vec!["e2"]]);
}

#[test]
fn right_angle_merges_only_with_wider_tolerance() {
    let graph = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 1.0, 1.0)])
        .one_way("east", "a", "b", residential(100.0))
        .one_way("north", "b", "c", residential(100.0))
        .graph;

    let strict = build_chains(&graph, &CorridorBuilderOptions::default());
    assert_eq!(strict.len(), 2);

    let relaxed = CorridorBuilderOptions {
        max_angle_change: 100.0,
        ..CorridorBuilderOptions::default()
    };
    assert_eq!(chain_ids(&build_chains(&graph, &relaxed)), vec![vec!["east", "north"]]);
}

#[test]
fn aggregation_sums_lengths_and_picks_predominant_class() {
    let graph = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0)])
        .one_way("e1", "a", "b", EdgeAttributes::new(RoadClass::Cycleway, 150.0))
        .one_way("e2", "b", "c", residential(250.0))
        .graph;
    let ids = ["e1".to_string(), "e2".to_string()];

    let attributes = aggregate_attributes(&ids, &graph);
    assert_eq!(attributes.length_meters, 400.0);
    assert_eq!(attributes.predominant_road_class, RoadClass::Residential);

    let graph = GraphSketch::new(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0)])
        .one_way("e1", "a", "b", EdgeAttributes::new(RoadClass::Cycleway, 300.0))
        .one_way("e2", "b", "c", residential(100.0))
        .graph;
    let attributes = aggregate_attributes(&ids, &graph);
    assert_eq!(attributes.predominant_road_class, RoadClass::Cycleway);
}

#[test]
fn chains_partition_the_grid() {
    let graph = mixed_grid(7);
    let options = CorridorBuilderOptions::default();
    let chains = build_chains(&graph, &options);

    let mut assigned: Vec<&str> = chains
        .iter()
        .flat_map(|chain| chain.member_edge_ids().map(String::as_str))
        .collect();
    assigned.sort_unstable();
    let mut all: Vec<&str> = graph.edges().iter().map(|edge| edge.id.as_str()).collect();
    all.sort_unstable();
    assert_eq!(assigned, all);

    for chain in &chains {
        let members: HashSet<&str> = chain.member_edge_ids().map(String::as_str).collect();
        for id in &members {
            if let Some(twin) = paired_edge_id(id)
                && graph.edge(&twin).is_some()
            {
                assert!(members.contains(twin.as_str()), "{id} split from {twin}");
            }
        }

        for pair in chain.edge_ids.windows(2) {
            let first = graph.edge(&pair[0]).unwrap();
            let second = graph.edge(&pair[1]).unwrap();
            assert_eq!(first.to_node_id, second.from_node_id);
            let turn = angle_difference(first.exit_bearing(), second.entry_bearing());
            assert!(turn <= options.max_angle_change);
        }
    }
}

#[test]
fn parallel_build_is_reproducible() {
    let graph = mixed_grid(9);
    let options = CorridorBuilderOptions::default();

    assert_eq!(build_chains(&graph, &options), build_chains_par(&graph, &options));
    assert_eq!(
        build_corridor_network(&graph, &options).unwrap(),
        build_corridor_network_par(&graph, &options).unwrap()
    );
}

#[test]
fn network_round_trips_through_json_with_scores() {
    let mut network =
        build_corridor_network(&mixed_grid(8), &CorridorBuilderOptions::default()).unwrap();
    assert!(network.corridor_count() > 0);
    score_network(&mut network, ActivityType::Walking, None).unwrap();
    score_network(&mut network, ActivityType::RoadCycling, None).unwrap();

    let json = serde_json::to_string(&network).unwrap();
    let restored: CorridorNetwork = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.adjacency, network.adjacency);
    assert_eq!(restored.data_quality, network.data_quality);
    assert_eq!(
        restored.connectors.keys().collect::<HashSet<_>>(),
        network.connectors.keys().collect::<HashSet<_>>()
    );
    for (id, corridor) in &network.corridors {
        let copy = &restored.corridors[id];
        assert_eq!(copy.edge_ids, corridor.edge_ids);
        assert_eq!(copy.corridor_type, corridor.corridor_type);
        assert_eq!(copy.scores.len(), 2);
        for (activity, score) in &corridor.scores {
            assert!((copy.scores[activity].overall - score.overall).abs() < 1e-12);
        }
    }
}

#[test]
fn pruning_keeps_network_consistent() {
    let mut network =
        build_corridor_network(&mixed_grid(8), &CorridorBuilderOptions::default()).unwrap();
    let before = network.corridor_count() + network.connector_count();

    // Keep the lower-left quarter only
    let bbox = Rect::new(coord! { x: -0.0001, y: -0.0001 }, coord! { x: 0.0035, y: 0.0035 });
    let removed = network.prune_outside(bbox);

    assert!(removed > 0);
    assert_eq!(network.corridor_count() + network.connector_count(), before - removed);
    assert!(network.dangling_references().is_empty());

    let index = CorridorIndex::new(&network);
    let outside = Rect::new(coord! { x: 0.006, y: 0.006 }, coord! { x: 0.007, y: 0.007 });
    assert!(index.corridors_in_bbox(outside).is_empty());
    if let Some(nearest) = index.nearest_corridor(Point::new(0.0, 0.0)) {
        assert!(network.corridors.contains_key(nearest));
    }
}

#[test]
fn scoring_profile_from_json_overrides_builtins() {
    let mut network =
        build_corridor_network(&mixed_grid(8), &CorridorBuilderOptions::default()).unwrap();
    let profile = ScoringParams::from_json_str(
        r#"{"weights": {"flow": 0.0, "safety": 0.0, "surface": 0.0, "character": 1.0},
            "character_table": {
                "dedicatedInfra": 1.0,
                "namedBikeInfra": 1.0,
                "namedRoad": 1.0,
                "unnamed": 1.0
            }}"#,
    )
    .unwrap();

    score_network(&mut network, ActivityType::RoadCycling, Some(&profile)).unwrap();
    for corridor in network.corridors.values() {
        assert_eq!(corridor.score(ActivityType::RoadCycling).unwrap().overall, 1.0);
    }
}

#[test]
fn two_way_greenway_with_crossing_link() {
    let greenway = || EdgeAttributes {
        name: Some("Riverside Greenway".to_string()),
        ..EdgeAttributes::new(RoadClass::Cycleway, 150.0)
    };
    let primary = || EdgeAttributes {
        is_oneway: true,
        ..EdgeAttributes::new(RoadClass::Primary, 111.0)
    };

    let graph = GraphSketch::new(&[
        ("a", 0.0, 0.0),
        ("b", 1.0, 0.0),
        ("c", 2.0, 0.0),
        ("d", 3.0, 0.0),
        ("e", 4.0, 0.0),
        ("f", 4.0, -1.0),
        ("g", 4.0, 1.0),
    ])
    .two_way("w1", "a", "b", greenway())
    .two_way("w2", "b", "c", greenway())
    .two_way("w3", "c", "d", greenway())
    .two_way("link", "d", "e", EdgeAttributes::new(RoadClass::Service, 50.0))
    .one_way("p1", "f", "e", primary())
    .one_way("p2", "e", "g", primary())
    .graph;

    let network = build_corridor_network(&graph, &CorridorBuilderOptions::default()).unwrap();
    assert_eq!(network.corridor_count(), 1);
    assert_eq!(network.connector_count(), 2);

    let corridor = &network.corridors["corridor-0"];
    assert_eq!(corridor.edge_ids, vec!["w1:fwd", "w2:fwd", "w3:fwd"]);
    assert_eq!(corridor.name.as_deref(), Some("Riverside Greenway"));
    assert_eq!(corridor.corridor_type, CorridorType::DedicatedInfra);
    assert_eq!(corridor.attributes.length_meters, 450.0);

    let link = &network.connectors["connector-0"];
    assert_eq!(link.edge_ids, vec!["link:fwd"]);
    assert_eq!(link.corridor_ids, vec!["corridor-0"]);
    assert!(link.crosses_major_road);
    assert!(!link.has_signal);
    assert_eq!(link.crossing_difficulty, 0.9);

    let road = &network.connectors["connector-1"];
    assert_eq!(road.edge_ids, vec!["p1", "p2"]);
    assert!(road.corridor_ids.is_empty());
}
