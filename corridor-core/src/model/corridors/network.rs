//! The corridor network and its in-place maintenance operations

use std::collections::BTreeSet;

use geo::{Intersects, Rect};
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{Connector, Corridor, DataQualityReport};
use crate::EntityId;

/// Corridors, connectors and their undirected adjacency.
///
/// Built once per graph snapshot. Afterwards callers may update corridor
/// scores or prune entities; pruning keeps adjacency and connector
/// references consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorNetwork {
    pub corridors: HashMap<EntityId, Corridor>,
    pub connectors: HashMap<EntityId, Connector>,
    /// Corridor/connector id -> neighbouring corridor/connector ids
    pub adjacency: HashMap<EntityId, BTreeSet<EntityId>>,
    #[serde(default)]
    pub data_quality: DataQualityReport,
}

impl CorridorNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty() && self.connectors.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.corridors.contains_key(id) || self.connectors.contains_key(id)
    }

    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = &EntityId> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Links two entities both ways; self-links are ignored
    pub(crate) fn link(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    pub fn remove_corridor(&mut self, id: &str) -> Option<Corridor> {
        let corridor = self.corridors.remove(id)?;
        self.detach(id);
        Some(corridor)
    }

    pub fn remove_connector(&mut self, id: &str) -> Option<Connector> {
        let connector = self.connectors.remove(id)?;
        self.detach(id);
        Some(connector)
    }

    /// Keeps only corridors matching `keep`. Returns the number removed.
    pub fn retain_corridors<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Corridor) -> bool,
    {
        let doomed: Vec<EntityId> = self
            .corridors
            .values()
            .filter(|corridor| !keep(*corridor))
            .map(|corridor| corridor.id.clone())
            .collect();

        for id in &doomed {
            self.remove_corridor(id);
        }
        doomed.len()
    }

    /// Drops every corridor and connector whose geometry misses `bbox`.
    /// Returns the number of removed entities.
    pub fn prune_outside(&mut self, bbox: Rect<f64>) -> usize {
        let removed_corridors =
            self.retain_corridors(|corridor| corridor.geometry.intersects(&bbox));

        let doomed: Vec<EntityId> = self
            .connectors
            .values()
            .filter(|connector| !connector.geometry.intersects(&bbox))
            .map(|connector| connector.id.clone())
            .collect();
        for id in &doomed {
            self.remove_connector(id);
        }

        debug!(
            "Pruned {removed_corridors} corridors and {} connectors outside {bbox:?}",
            doomed.len()
        );
        removed_corridors + doomed.len()
    }

    /// Unlinks `id` from its neighbours. Connector `corridor_ids` only ever
    /// name adjacent corridors, so only neighbouring connectors are touched.
    fn detach(&mut self, id: &str) {
        let Some(neighbors) = self.adjacency.remove(id) else {
            return;
        };
        for neighbor in &neighbors {
            if let Some(back) = self.adjacency.get_mut(neighbor) {
                back.remove(id);
            }
            if let Some(connector) = self.connectors.get_mut(neighbor) {
                connector.corridor_ids.retain(|corridor_id| corridor_id != id);
            }
        }
    }

    /// References to entities that are not in the network, as `(holder, missing)` pairs
    pub fn dangling_references(&self) -> Vec<(EntityId, EntityId)> {
        let mut dangling = Vec::new();
        for (holder, neighbors) in &self.adjacency {
            if !self.contains(holder) {
                dangling.push((holder.clone(), holder.clone()));
            }
            for neighbor in neighbors {
                if !self.contains(neighbor) {
                    dangling.push((holder.clone(), neighbor.clone()));
                }
            }
        }
        for connector in self.connectors.values() {
            for corridor_id in &connector.corridor_ids {
                if !self.corridors.contains_key(corridor_id) {
                    dangling.push((connector.id.clone(), corridor_id.clone()));
                }
            }
        }
        dangling
    }
}
