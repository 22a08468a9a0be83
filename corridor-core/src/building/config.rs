use serde::{Deserialize, Serialize};

use crate::{Error, model::CorridorType};

/// Weights of the three edge-compatibility components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityWeights {
    pub road_class: f64,
    pub surface: f64,
    pub infrastructure: f64,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            road_class: 0.6,
            surface: 0.25,
            infrastructure: 0.15,
        }
    }
}

impl CompatibilityWeights {
    pub fn total(&self) -> f64 {
        self.road_class + self.surface + self.infrastructure
    }
}

/// Base minimum corridor length in meters per tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub dedicated_infra: f64,
    pub named_bike_infra: f64,
    pub named_road: f64,
    pub unnamed: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            dedicated_infra: 400.0,
            named_bike_infra: 800.0,
            named_road: 1609.0,
            unnamed: 1609.0,
        }
    }
}

impl TierThresholds {
    /// Same threshold for every tier
    pub fn uniform(meters: f64) -> Self {
        Self {
            dedicated_infra: meters,
            named_bike_infra: meters,
            named_road: meters,
            unnamed: meters,
        }
    }

    pub fn for_type(&self, corridor_type: CorridorType) -> f64 {
        match corridor_type {
            CorridorType::DedicatedInfra => self.dedicated_infra,
            CorridorType::NamedBikeInfra => self.named_bike_infra,
            CorridorType::NamedRoad => self.named_road,
            CorridorType::Unnamed => self.unnamed,
        }
    }

    fn values(&self) -> [f64; 4] {
        [
            self.dedicated_infra,
            self.named_bike_infra,
            self.named_road,
            self.unnamed,
        ]
    }
}

/// Options controlling chain building, classification and simplification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorBuilderOptions {
    /// Largest bearing change in degrees allowed between consecutive chain edges
    pub max_angle_change: f64,
    /// Per-tier base thresholds; takes precedence over `min_length_meters`
    pub min_length_by_tier: Option<TierThresholds>,
    /// Single base threshold for all tiers
    pub min_length_meters: Option<f64>,
    pub compatibility_weights: CompatibilityWeights,
    /// Douglas-Peucker tolerance for corridor display geometry
    pub simplify_tolerance_meters: f64,
}

impl Default for CorridorBuilderOptions {
    fn default() -> Self {
        Self {
            max_angle_change: 45.0,
            min_length_by_tier: None,
            min_length_meters: None,
            compatibility_weights: CompatibilityWeights::default(),
            simplify_tolerance_meters: 10.0,
        }
    }
}

impl CorridorBuilderOptions {
    /// Effective per-tier base thresholds
    pub fn tier_thresholds(&self) -> TierThresholds {
        self.min_length_by_tier
            .or_else(|| self.min_length_meters.map(TierThresholds::uniform))
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the options are invalid
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    ///
    /// Returns an error describing the first invalid option
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=180.0).contains(&self.max_angle_change) {
            return Err(Error::InvalidConfig(format!(
                "max_angle_change must be in [0, 180], got {}",
                self.max_angle_change
            )));
        }

        if !self.simplify_tolerance_meters.is_finite() || self.simplify_tolerance_meters < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "simplify_tolerance_meters must be a non-negative number, got {}",
                self.simplify_tolerance_meters
            )));
        }

        if let Some(meters) = self.min_length_meters
            && (!meters.is_finite() || meters < 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "min_length_meters must be a non-negative number, got {meters}"
            )));
        }

        if self
            .tier_thresholds()
            .values()
            .iter()
            .any(|threshold| !threshold.is_finite() || *threshold < 0.0)
        {
            return Err(Error::InvalidConfig(
                "Tier thresholds must be non-negative numbers".to_string(),
            ));
        }

        let weights = &self.compatibility_weights;
        let components = [weights.road_class, weights.surface, weights.infrastructure];
        if components.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.total() <= 0.0 {
            return Err(Error::InvalidConfig(
                "Compatibility weights must be non-negative with a positive sum".to_string(),
            ));
        }

        Ok(())
    }
}
