use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use itertools::Itertools;
use serde_json::json;

use crate::Error;
use crate::model::{Connector, Corridor, CorridorNetwork};

/// Converts the network to a `GeoJSON` `FeatureCollection`.
///
/// Corridors come first, then connectors, each sorted by id.
pub fn network_to_geojson(network: &CorridorNetwork) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(network.corridor_count() + network.connector_count());

    for corridor in network.corridors.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        features.push(corridor_feature(corridor, network)?);
    }
    for connector in network.connectors.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        features.push(connector_feature(connector, network)?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

impl CorridorNetwork {
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        network_to_geojson(self)
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn corridor_feature(corridor: &Corridor, network: &CorridorNetwork) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeometryValue::from(&corridor.geometry));
    let attrs = &corridor.attributes;
    let scores: serde_json::Map<String, serde_json::Value> = corridor
        .scores
        .iter()
        .sorted_by_key(|(activity, _)| **activity)
        .map(|(activity, score)| (activity.to_string(), json!(score)))
        .collect();

    let value = json!({
        "type": "Feature",
        "id": corridor.id,
        "geometry": geometry,
        "properties": {
            "entity_type": "corridor",
            "name": corridor.name,
            "type": corridor.corridor_type,
            "length_meters": attrs.length_meters,
            "road_class": attrs.predominant_road_class,
            "surface": attrs.predominant_surface,
            "surface_confidence": attrs.surface_confidence,
            "bicycle_infra_continuity": attrs.bicycle_infra_continuity,
            "pedestrian_path_continuity": attrs.pedestrian_path_continuity,
            "separation_continuity": attrs.separation_continuity,
            "stop_density_per_km": attrs.stop_density_per_km,
            "turns_count": attrs.turns_count,
            "average_speed_limit": attrs.average_speed_limit,
            "is_oneway": corridor.is_oneway,
            "edge_count": corridor.edge_ids.len(),
            "neighbors": network.neighbors(&corridor.id).collect::<Vec<_>>(),
            "scores": scores,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn connector_feature(connector: &Connector, network: &CorridorNetwork) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeometryValue::from(&connector.geometry));

    let value = json!({
        "type": "Feature",
        "id": connector.id,
        "geometry": geometry,
        "properties": {
            "entity_type": "connector",
            "length_meters": connector.length_meters,
            "corridor_ids": connector.corridor_ids,
            "crosses_major_road": connector.crosses_major_road,
            "has_signal": connector.has_signal,
            "has_stop": connector.has_stop,
            "crossing_difficulty": connector.crossing_difficulty,
            "neighbors": network.neighbors(&connector.id).collect::<Vec<_>>(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
