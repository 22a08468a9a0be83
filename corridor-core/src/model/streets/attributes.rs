//! Edge attributes as delivered by the ingestion and enrichment pipeline

use serde::{Deserialize, Serialize};

/// Road classification of a street segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Track,
    Cycleway,
    Path,
    Footway,
    Pedestrian,
    Bridleway,
    Steps,
    /// Any class the extraction stage could not map
    #[default]
    #[serde(other)]
    Other,
}

/// Coarse grouping used when comparing neighbouring edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClassGroup {
    MajorRoad,
    MinorRoad,
    Path,
    Track,
    Other,
}

impl RoadClass {
    pub fn group(self) -> RoadClassGroup {
        match self {
            Self::Motorway | Self::Trunk | Self::Primary | Self::Secondary => {
                RoadClassGroup::MajorRoad
            }
            Self::Tertiary
            | Self::Unclassified
            | Self::Residential
            | Self::LivingStreet
            | Self::Service => RoadClassGroup::MinorRoad,
            Self::Cycleway
            | Self::Path
            | Self::Footway
            | Self::Pedestrian
            | Self::Bridleway
            | Self::Steps => RoadClassGroup::Path,
            Self::Track => RoadClassGroup::Track,
            Self::Other => RoadClassGroup::Other,
        }
    }

    /// Classes built for non-motorized traffic only
    pub fn is_dedicated_infra(self) -> bool {
        matches!(self, Self::Cycleway | Self::Path | Self::Footway)
    }

    pub fn is_major(self) -> bool {
        self.group() == RoadClassGroup::MajorRoad
    }
}

/// Resolved surface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceType {
    Asphalt,
    Concrete,
    Paved,
    PavingStones,
    Sett,
    Compacted,
    FineGravel,
    Gravel,
    Dirt,
    Ground,
    Unpaved,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SurfaceType {
    /// `None` when the surface is unknown
    pub fn is_paved(self) -> Option<bool> {
        match self {
            Self::Asphalt | Self::Concrete | Self::Paved | Self::PavingStones | Self::Sett => {
                Some(true)
            }
            Self::Compacted
            | Self::FineGravel
            | Self::Gravel
            | Self::Dirt
            | Self::Ground
            | Self::Unpaved => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Surface type together with the enrichment stage's certainty about it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceClassification {
    pub surface: SurfaceType,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Sources disagreed on the surface
    pub has_conflict: bool,
}

impl SurfaceClassification {
    pub fn new(surface: SurfaceType, confidence: f64) -> Self {
        Self {
            surface,
            confidence,
            has_conflict: false,
        }
    }
}

/// Physical attributes of a single logical edge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAttributes {
    pub road_class: RoadClass,
    pub surface: SurfaceClassification,
    pub speed_limit_kmh: Option<f64>,
    pub lanes: Option<u8>,
    pub name: Option<String>,
    pub has_bicycle_infra: bool,
    pub is_pedestrian_path: bool,
    pub has_shoulder: bool,
    pub is_separated: bool,
    pub has_traffic_calming: bool,
    pub is_oneway: bool,
    pub length_meters: f64,
    pub stop_sign_count: Option<u32>,
    pub signal_count: Option<u32>,
    pub crossing_count: Option<u32>,
}

impl EdgeAttributes {
    pub fn new(road_class: RoadClass, length_meters: f64) -> Self {
        Self {
            road_class,
            length_meters,
            ..Self::default()
        }
    }

    /// Dedicated path class, or bicycle infrastructure physically separated from traffic
    pub fn is_dedicated_infra(&self) -> bool {
        self.road_class.is_dedicated_infra() || (self.has_bicycle_infra && self.is_separated)
    }

    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_tags_deserialize_to_fallbacks() {
        let class: RoadClass = serde_json::from_str("\"busway\"").unwrap();
        let surface: SurfaceType = serde_json::from_str("\"woodchips\"").unwrap();
        assert_eq!(class, RoadClass::Other);
        assert_eq!(surface, SurfaceType::Unknown);

        let class: RoadClass = serde_json::from_str("\"living_street\"").unwrap();
        assert_eq!(class, RoadClass::LivingStreet);
    }

    #[test]
    fn test_dedicated_infra() {
        assert!(EdgeAttributes::new(RoadClass::Footway, 10.0).is_dedicated_infra());

        let mut lane = EdgeAttributes::new(RoadClass::Secondary, 10.0);
        lane.has_bicycle_infra = true;
        assert!(!lane.is_dedicated_infra());
        lane.is_separated = true;
        assert!(lane.is_dedicated_infra());
    }

    #[test]
    fn test_empty_name_is_no_name() {
        let mut attrs = EdgeAttributes::new(RoadClass::Residential, 10.0);
        attrs.name = Some(String::new());
        assert!(!attrs.has_name());
        attrs.name = Some("Elm Street".to_string());
        assert!(attrs.has_name());
    }
}
