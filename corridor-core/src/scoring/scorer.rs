use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::ActivityType;
use super::params::ScoringParams;
use super::tables::{road_class_safety, speed_limit_score};
use crate::Error;
use crate::model::{Corridor, CorridorAttributes, CorridorNetwork};

/// Length at which the flow length term saturates
const FLOW_SATURATION_METERS: f64 = 10_000.0;
/// Length scale of the logarithmic flow length term
const FLOW_LENGTH_SCALE_METERS: f64 = 300.0;
/// Decay of the stop term per stop/km
const STOP_DECAY: f64 = 0.2;

/// Per-activity suitability of a corridor; every field is in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorScore {
    pub flow: f64,
    pub safety: f64,
    pub surface: f64,
    pub character: f64,
    pub overall: f64,
}

/// How long and uninterrupted the corridor is
pub fn score_flow(attributes: &CorridorAttributes) -> f64 {
    let length = attributes.length_meters.max(0.0);
    let length_score = ((length / FLOW_LENGTH_SCALE_METERS).ln_1p()
        / (FLOW_SATURATION_METERS / FLOW_LENGTH_SCALE_METERS).ln_1p())
    .min(1.0);
    let stop_score = (-STOP_DECAY * attributes.stop_density_per_km.max(0.0)).exp();

    0.6 * length_score + 0.4 * stop_score
}

/// Separation from motor traffic.
///
/// Cycling counts bicycle infrastructure continuity, running and walking
/// count pedestrian path continuity.
pub fn score_safety(attributes: &CorridorAttributes, activity: ActivityType) -> f64 {
    let infrastructure = if activity.is_cycling() {
        attributes.bicycle_infra_continuity
    } else {
        attributes.pedestrian_path_continuity
    };

    0.3 * infrastructure
        + 0.3 * attributes.separation_continuity
        + 0.2 * speed_limit_score(attributes.average_speed_limit)
        + 0.2 * road_class_safety(attributes.predominant_road_class)
}

pub fn score_surface(
    attributes: &CorridorAttributes,
    activity: ActivityType,
    params: Option<&ScoringParams>,
) -> f64 {
    let preference = ScoringParams::surface_value(params, activity, attributes.predominant_surface);
    let confidence = attributes.surface_confidence.clamp(0.0, 1.0);
    preference * (0.5 + 0.5 * confidence)
}

pub fn score_character(
    corridor: &Corridor,
    activity: ActivityType,
    params: Option<&ScoringParams>,
) -> f64 {
    ScoringParams::character_value(params, activity, corridor.corridor_type)
}

/// Scores one corridor for `activity`.
///
/// Without `params`, or for any field `params` leaves unset, the built-in
/// weights and tables of the activity apply.
pub fn score_corridor(
    corridor: &Corridor,
    activity: ActivityType,
    params: Option<&ScoringParams>,
) -> CorridorScore {
    let attributes = &corridor.attributes;
    let flow = score_flow(attributes);
    let safety = score_safety(attributes, activity);
    let surface = score_surface(attributes, activity, params);
    let character = score_character(corridor, activity, params);

    let weights = ScoringParams::weights_for(params, activity);
    let overall = (weights.flow * flow
        + weights.safety * safety
        + weights.surface * surface
        + weights.character * character)
        .clamp(0.0, 1.0);

    CorridorScore {
        flow,
        safety,
        surface,
        character,
        overall,
    }
}

/// Scores every corridor of the network for `activity`, in parallel.
///
/// Each score is stored under `activity`; scores of other activities are kept.
///
/// # Errors
///
/// Returns an error if `params` are invalid
pub fn score_network(
    network: &mut CorridorNetwork,
    activity: ActivityType,
    params: Option<&ScoringParams>,
) -> Result<(), Error> {
    if let Some(params) = params {
        params.validate()?;
    }

    info!(
        "Scoring {} corridors for {activity}",
        network.corridor_count()
    );

    network.corridors.par_values_mut().for_each(|corridor| {
        let score = score_corridor(corridor, activity, params);
        corridor.scores.insert(activity, score);
    });

    debug!("Scored corridors for {activity}");
    Ok(())
}
