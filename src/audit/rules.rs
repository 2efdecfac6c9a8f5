//! Audit rule thresholds and scoring policy
//!
//! All thresholds are positive numbers in meters / square meters. A `RuleSet`
//! is immutable for the duration of one validation pass and is echoed into
//! the report so a consumer can see which thresholds produced it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rule threshold that cannot be used for checking
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    /// A zero or negative threshold makes its check degenerately always-pass
    /// or always-fail
    #[error("rule `{0}` must be positive, got {1}")]
    NonPositive(&'static str, f64),
}

/// Score penalty per violation, by severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub critical: f32,
    pub major: f32,
    pub minor: f32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: 25.0,
            major: 10.0,
            minor: 2.0,
        }
    }
}

/// Named compliance thresholds, meters / m²
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub min_main_corridor_width: f32,
    pub min_access_corridor_width: f32,
    pub max_travel_distance: f32,
    pub max_dead_end_length: f32,
    pub fire_wall_interval: f32,
    pub max_compartment_area: f32,
    pub min_door_width: f32,
    pub wheelchair_turn_radius: f32,
    pub min_wall_clearance: f32,
    pub min_unit_spacing: f32,
    pub min_exits_per_floor: usize,
    pub max_distance_between_exits: f32,
    pub weights: SeverityWeights,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            min_main_corridor_width: 1.5,
            min_access_corridor_width: 1.2,
            max_travel_distance: 23.0,
            max_dead_end_length: 15.0,
            fire_wall_interval: 30.0,
            max_compartment_area: 500.0,
            min_door_width: 0.9,
            wheelchair_turn_radius: 1.5,
            min_wall_clearance: 0.3,
            min_unit_spacing: 0.05,
            min_exits_per_floor: 2,
            max_distance_between_exits: 30.0,
            weights: SeverityWeights::default(),
        }
    }
}

impl RuleSet {
    /// Construction-time hardening: reject any non-positive threshold or
    /// weight before it can silently neuter a check
    pub fn checked(self) -> Result<Self, RuleError> {
        let thresholds: [(&'static str, f32); 14] = [
            ("min_main_corridor_width", self.min_main_corridor_width),
            ("min_access_corridor_width", self.min_access_corridor_width),
            ("max_travel_distance", self.max_travel_distance),
            ("max_dead_end_length", self.max_dead_end_length),
            ("fire_wall_interval", self.fire_wall_interval),
            ("max_compartment_area", self.max_compartment_area),
            ("min_door_width", self.min_door_width),
            ("wheelchair_turn_radius", self.wheelchair_turn_radius),
            ("min_wall_clearance", self.min_wall_clearance),
            ("min_unit_spacing", self.min_unit_spacing),
            ("max_distance_between_exits", self.max_distance_between_exits),
            ("weights.critical", self.weights.critical),
            ("weights.major", self.weights.major),
            ("weights.minor", self.weights.minor),
        ];
        for (name, value) in thresholds {
            if !(value > 0.0) || !value.is_finite() {
                return Err(RuleError::NonPositive(name, value as f64));
            }
        }
        if self.min_exits_per_floor == 0 {
            return Err(RuleError::NonPositive("min_exits_per_floor", 0.0));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RuleSet::default().checked().is_ok());
    }

    #[test]
    fn test_default_weights() {
        let w = SeverityWeights::default();
        assert_eq!(w.critical, 25.0);
        assert_eq!(w.major, 10.0);
        assert_eq!(w.minor, 2.0);
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let mut rules = RuleSet::default();
        rules.max_travel_distance = 0.0;
        assert_eq!(
            rules.checked(),
            Err(RuleError::NonPositive("max_travel_distance", 0.0))
        );

        let mut rules = RuleSet::default();
        rules.min_wall_clearance = -0.5;
        assert!(rules.checked().is_err());

        let mut rules = RuleSet::default();
        rules.min_exits_per_floor = 0;
        assert!(rules.checked().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut rules = RuleSet::default();
        rules.wheelchair_turn_radius = f32::NAN;
        assert!(rules.checked().is_err());
    }
}
