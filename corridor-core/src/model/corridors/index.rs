//! Spatial index over corridor display geometry

use geo::{Point, Rect};
use itertools::Itertools;
use rstar::{
    AABB, RTree,
    primitives::{GeomWithData, Line},
};

use super::CorridorNetwork;
use crate::EntityId;

type IndexedSegment = GeomWithData<Line<[f64; 2]>, EntityId>;

/// R-tree of corridor geometry segments, for bbox and nearest-corridor lookups.
///
/// Built from a network snapshot; rebuild after pruning.
#[derive(Debug)]
pub struct CorridorIndex {
    tree: RTree<IndexedSegment>,
}

impl CorridorIndex {
    pub fn new(network: &CorridorNetwork) -> Self {
        let segments: Vec<IndexedSegment> = network
            .corridors
            .values()
            .flat_map(|corridor| {
                corridor.geometry.lines().map(|line| {
                    GeomWithData::new(
                        Line::new([line.start.x, line.start.y], [line.end.x, line.end.y]),
                        corridor.id.clone(),
                    )
                })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(segments),
        }
    }

    /// Ids of corridors with a segment intersecting `bbox`, sorted
    pub fn corridors_in_bbox(&self, bbox: Rect<f64>) -> Vec<&EntityId> {
        let envelope =
            AABB::from_corners([bbox.min().x, bbox.min().y], [bbox.max().x, bbox.max().y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|segment| &segment.data)
            .sorted()
            .dedup()
            .collect()
    }

    /// Corridor whose geometry passes closest to `point` (planar lon/lat distance)
    pub fn nearest_corridor(&self, point: Point<f64>) -> Option<&EntityId> {
        self.tree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|segment| &segment.data)
    }

    pub fn segment_count(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
