use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::ActivityType;
use super::tables::{CHARACTER_FALLBACK, character_preference, surface_preference};
use crate::Error;
use crate::model::{CorridorType, SurfaceType};

/// Weights of the four score dimensions in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub flow: f64,
    pub safety: f64,
    pub surface: f64,
    pub character: f64,
}

impl ScoreWeights {
    /// Built-in weights of an activity; each set sums to 1.0
    pub fn for_activity(activity: ActivityType) -> Self {
        let (flow, safety, surface, character) = match activity {
            ActivityType::RoadCycling => (0.30, 0.30, 0.25, 0.15),
            ActivityType::GravelCycling => (0.20, 0.20, 0.30, 0.30),
            ActivityType::Running => (0.30, 0.35, 0.15, 0.20),
            ActivityType::Walking => (0.15, 0.40, 0.15, 0.30),
        };
        Self {
            flow,
            safety,
            surface,
            character,
        }
    }

    fn values(&self) -> [f64; 4] {
        [self.flow, self.safety, self.surface, self.character]
    }
}

/// Externally tuned scoring parameters for one activity.
///
/// Every field is optional; a supplied table replaces the built-in table
/// entirely, so keys it omits fall back to the neutral defaults rather than
/// to the built-in values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub weights: Option<ScoreWeights>,
    pub surface_table: Option<HashMap<SurfaceType, f64>>,
    pub character_table: Option<HashMap<CorridorType, f64>>,
}

impl ScoringParams {
    /// Parses a saved scoring profile
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the parameters are invalid
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// # Errors
    ///
    /// Returns an error if a weight is negative or not finite, or a table
    /// value falls outside [0, 1]
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(weights) = &self.weights
            && weights.values().iter().any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "Score weights must be non-negative numbers, got {weights:?}"
            )));
        }

        let table_values = self
            .surface_table
            .iter()
            .flat_map(HashMap::values)
            .chain(self.character_table.iter().flat_map(HashMap::values));
        for value in table_values {
            if !(0.0..=1.0).contains(value) {
                return Err(Error::InvalidConfig(format!(
                    "Scoring table values must be within [0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn weights_for(params: Option<&Self>, activity: ActivityType) -> ScoreWeights {
        params
            .and_then(|params| params.weights)
            .unwrap_or_else(|| ScoreWeights::for_activity(activity))
    }

    pub(crate) fn surface_value(
        params: Option<&Self>,
        activity: ActivityType,
        surface: SurfaceType,
    ) -> f64 {
        match params.and_then(|params| params.surface_table.as_ref()) {
            Some(table) => table
                .get(&surface)
                .copied()
                .unwrap_or_else(|| surface_preference(activity, SurfaceType::Unknown)),
            None => surface_preference(activity, surface),
        }
    }

    pub(crate) fn character_value(
        params: Option<&Self>,
        activity: ActivityType,
        corridor_type: CorridorType,
    ) -> f64 {
        match params.and_then(|params| params.character_table.as_ref()) {
            Some(table) => table.get(&corridor_type).copied().unwrap_or(CHARACTER_FALLBACK),
            None => character_preference(activity, corridor_type),
        }
    }
}
