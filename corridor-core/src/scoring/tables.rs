//! Built-in lookup tables behind the per-activity scores
//!
//! Every table is an exhaustive match, so adding a road class, surface,
//! corridor type or activity fails to compile until the tables are updated.
//! `Unknown`/`Other` keys carry each table's neutral fallback.

use super::ActivityType;
use crate::model::{CorridorType, RoadClass, SurfaceType};

/// Character fallback for corridor types missing from an override table
pub const CHARACTER_FALLBACK: f64 = 0.3;

/// Preference of `activity` for a surface, in [0, 1]
pub fn surface_preference(activity: ActivityType, surface: SurfaceType) -> f64 {
    use SurfaceType as S;

    match activity {
        // Loose surfaces disqualify road bikes outright
        ActivityType::RoadCycling => match surface {
            S::Asphalt => 1.0,
            S::Concrete | S::Paved => 0.9,
            S::PavingStones => 0.6,
            S::Sett | S::Compacted => 0.3,
            S::FineGravel | S::Gravel | S::Dirt | S::Ground | S::Unpaved => 0.0,
            S::Unknown => 0.4,
        },
        ActivityType::GravelCycling => match surface {
            S::Asphalt | S::Concrete | S::Paved => 0.5,
            S::PavingStones => 0.4,
            S::Sett => 0.3,
            S::Compacted => 0.9,
            S::FineGravel | S::Gravel => 1.0,
            S::Dirt | S::Unpaved => 0.8,
            S::Ground => 0.7,
            S::Unknown => 0.5,
        },
        ActivityType::Running => match surface {
            S::Asphalt | S::Paved => 0.7,
            S::Concrete | S::PavingStones => 0.6,
            S::Sett => 0.4,
            S::Compacted => 0.9,
            S::FineGravel => 1.0,
            S::Gravel | S::Dirt | S::Ground => 0.8,
            S::Unpaved => 0.7,
            S::Unknown => 0.6,
        },
        ActivityType::Walking => match surface {
            S::Asphalt | S::Concrete | S::Paved | S::PavingStones => 0.8,
            S::Sett => 0.6,
            S::Compacted | S::FineGravel => 0.9,
            S::Gravel => 0.8,
            S::Dirt | S::Ground | S::Unpaved => 0.7,
            S::Unknown => 0.6,
        },
    }
}

/// How well a corridor tier suits `activity`, in [0, 1]
pub fn character_preference(activity: ActivityType, corridor_type: CorridorType) -> f64 {
    use CorridorType as C;

    match (activity, corridor_type) {
        (ActivityType::RoadCycling, C::DedicatedInfra) => 0.7,
        (ActivityType::RoadCycling, C::NamedBikeInfra) => 0.9,
        (ActivityType::RoadCycling, C::NamedRoad) => 0.6,
        (ActivityType::RoadCycling, C::Unnamed) => 0.3,

        (ActivityType::GravelCycling, C::DedicatedInfra) => 0.8,
        (ActivityType::GravelCycling, C::NamedBikeInfra) => 0.6,
        (ActivityType::GravelCycling, C::NamedRoad) => 0.4,
        (ActivityType::GravelCycling, C::Unnamed) => 0.7,

        (ActivityType::Running, C::DedicatedInfra) => 1.0,
        (ActivityType::Running, C::NamedBikeInfra) => 0.7,
        (ActivityType::Running, C::NamedRoad) => 0.5,
        (ActivityType::Running, C::Unnamed) => 0.4,

        (ActivityType::Walking, C::DedicatedInfra) => 1.0,
        (ActivityType::Walking, C::NamedBikeInfra) => 0.6,
        (ActivityType::Walking, C::NamedRoad) => 0.5,
        (ActivityType::Walking, C::Unnamed) => 0.4,
    }
}

/// Traffic exposure of a road class; 1.0 is car-free
pub fn road_class_safety(road_class: RoadClass) -> f64 {
    match road_class {
        RoadClass::Cycleway | RoadClass::Path | RoadClass::Footway => 1.0,
        RoadClass::Residential | RoadClass::Service | RoadClass::Unclassified => 0.8,
        RoadClass::Tertiary | RoadClass::Track => 0.6,
        RoadClass::Secondary => 0.4,
        RoadClass::Primary => 0.2,
        RoadClass::Trunk | RoadClass::Motorway => 0.0,
        RoadClass::LivingStreet
        | RoadClass::Pedestrian
        | RoadClass::Bridleway
        | RoadClass::Steps
        | RoadClass::Other => 0.5,
    }
}

/// Score of an average speed limit in km/h; 0.5 when unknown
pub fn speed_limit_score(speed_limit_kmh: Option<f64>) -> f64 {
    match speed_limit_kmh {
        Some(speed) if speed <= 30.0 => 1.0,
        Some(speed) if speed <= 40.0 => 0.8,
        Some(speed) if speed <= 50.0 => 0.6,
        Some(speed) if speed <= 60.0 => 0.3,
        // Same floor for the 60-80 band and anything faster
        Some(speed) if !speed.is_nan() => 0.1,
        Some(_) | None => 0.5,
    }
}
