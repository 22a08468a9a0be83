use std::hint::black_box;

use corridor_core::prelude::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geo::{LineString, coord};

const STEP: f64 = 0.001;

/// Square street grid of `size` x `size` nodes with two-way blocks.
/// Every fourth row is a named cycleway, the rest are unnamed residential streets.
fn grid_graph(size: usize) -> StreetGraph {
    let mut graph = StreetGraph::new();
    let node_id = |row: usize, col: usize| format!("n{row}_{col}");

    for row in 0..size {
        for col in 0..size {
            graph.add_node(StreetNode::new(
                node_id(row, col),
                col as f64 * STEP,
                row as f64 * STEP,
            ));
        }
    }

    for row in 0..size {
        for col in 0..size {
            let (x, y) = (col as f64 * STEP, row as f64 * STEP);
            if col + 1 < size {
                let attributes = if row % 4 == 0 {
                    EdgeAttributes {
                        name: Some(format!("Greenway {row}")),
                        ..EdgeAttributes::new(RoadClass::Cycleway, 111.0)
                    }
                } else {
                    EdgeAttributes::new(RoadClass::Residential, 111.0)
                };
                graph
                    .add_bidirectional_edge(
                        &format!("h{row}_{col}"),
                        node_id(row, col),
                        node_id(row, col + 1),
                        LineString::new(vec![coord! { x: x, y: y }, coord! { x: x + STEP, y: y }]),
                        attributes,
                    )
                    .unwrap();
            }
            if row + 1 < size {
                graph
                    .add_bidirectional_edge(
                        &format!("v{row}_{col}"),
                        node_id(row, col),
                        node_id(row + 1, col),
                        LineString::new(vec![coord! { x: x, y: y }, coord! { x: x, y: y + STEP }]),
                        EdgeAttributes::new(RoadClass::Residential, 111.0),
                    )
                    .unwrap();
            }
        }
    }

    graph
}

fn bench_build(c: &mut Criterion) {
    let options = CorridorBuilderOptions::default();
    let mut group = c.benchmark_group("build_corridor_network");

    for size in [20, 60] {
        let graph = grid_graph(size);
        group.bench_with_input(BenchmarkId::new("sequential", size), &graph, |b, graph| {
            b.iter(|| build_corridor_network(black_box(graph), &options).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &graph, |b, graph| {
            b.iter(|| build_corridor_network_par(black_box(graph), &options).unwrap());
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let graph = grid_graph(60);
    let network = build_corridor_network(&graph, &CorridorBuilderOptions::default()).unwrap();

    c.bench_function("score_network", |b| {
        b.iter_batched(
            || network.clone(),
            |mut network| {
                score_network(&mut network, ActivityType::RoadCycling, None).unwrap();
                network
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_build, bench_scoring);
criterion_main!(benches);
