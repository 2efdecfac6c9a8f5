//! Audit finding and report types
//!
//! Violations carry a severity that alone determines their score weight;
//! warnings are advisory and never affect score or pass/fail.

use serde::Serialize;

use crate::geometry::Point;

use super::rules::{RuleSet, SeverityWeights};

/// Violation codes emitted by the pipeline
pub mod codes {
    pub const CORRIDOR_TOO_NARROW: &str = "CORRIDOR_TOO_NARROW";
    pub const NO_CORRIDORS: &str = "NO_CORRIDORS";
    pub const NO_ENTRANCES: &str = "NO_ENTRANCES";
    pub const TRAVEL_DISTANCE_EXCEEDED: &str = "TRAVEL_DISTANCE_EXCEEDED";
    pub const TRAVEL_DISTANCE_NEAR_LIMIT: &str = "TRAVEL_DISTANCE_NEAR_LIMIT";
    pub const DEAD_END_TOO_LONG: &str = "DEAD_END_TOO_LONG";
    pub const INSUFFICIENT_WALL_CLEARANCE: &str = "INSUFFICIENT_WALL_CLEARANCE";
    pub const WALL_OVERLAP: &str = "WALL_OVERLAP";
    pub const UNIT_OVERLAP: &str = "UNIT_OVERLAP";
    pub const UNIT_SPACING: &str = "UNIT_SPACING";
    pub const OUT_OF_BOUNDS: &str = "OUT_OF_BOUNDS";
    pub const COMPARTMENT_TOO_LARGE: &str = "COMPARTMENT_TOO_LARGE";
    pub const INSUFFICIENT_EXITS: &str = "INSUFFICIENT_EXITS";
    pub const EXIT_TOO_NARROW: &str = "EXIT_TOO_NARROW";
    pub const EXITS_TOO_FAR_APART: &str = "EXITS_TOO_FAR_APART";
    pub const TURN_RADIUS_RESTRICTED: &str = "TURN_RADIUS_RESTRICTED";
}

/// Violation severity; the weight table in the rules maps each level to its
/// score penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn weight(&self, weights: &SeverityWeights) -> f32 {
        match self {
            Severity::Critical => weights.critical,
            Severity::Major => weights.major,
            Severity::Minor => weights.minor,
        }
    }
}

/// A compliance failure found by one of the checks
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f32>,
}

/// An advisory finding; never scored
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

/// Per-severity tallies and input counts
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_units: usize,
    pub total_corridors: usize,
    pub critical_violations: usize,
    pub major_violations: usize,
    pub minor_violations: usize,
    pub warning_count: usize,
}

/// Result of one validation pass
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub passed: bool,
    pub score: f32,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
    pub summary: Summary,
    pub rules: RuleSet,
}

/// Per-call accumulator, created fresh at the top of every validation pass
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
}
