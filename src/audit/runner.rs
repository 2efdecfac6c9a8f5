//! Audit entry point and report assembly
//!
//! `validate` is a pure function over its inputs: accumulators are created
//! fresh per call, the layout is never mutated, and concurrent calls share
//! nothing.

use std::time::Instant;

use tracing::debug;

use crate::geometry::build_unit_index;
use crate::model::Layout;

use super::checks;
use super::rules::{RuleSet, SeverityWeights};
use super::types::{Findings, Report, Severity, Summary};

/// Run the full compliance pipeline over a layout
pub fn validate(layout: &Layout, rules: &RuleSet) -> Report {
    let start = Instant::now();
    let mut findings = Findings::default();
    let index = build_unit_index(&layout.boxes);

    checks::check_corridor_widths(layout, rules, &mut findings);
    checks::check_travel_distances(layout, rules, &mut findings);
    checks::check_dead_ends(layout, rules, &mut findings);
    checks::check_wall_clearance(layout, rules, &mut findings);
    checks::check_unit_overlap(layout, &index, &mut findings);
    checks::check_unit_spacing(layout, rules, &index, &mut findings);
    checks::check_bounds_containment(layout, &mut findings);
    checks::check_fire_compartments(layout, rules, &mut findings);
    checks::check_egress(layout, rules, &mut findings);
    checks::check_accessibility(layout, rules, &index, &mut findings);

    let report = assemble(layout, rules, findings);
    debug!(
        units = layout.boxes.len(),
        corridors = layout.corridors.len(),
        violations = report.violations.len(),
        warnings = report.warnings.len(),
        score = report.score,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "audit completed"
    );
    report
}

/// Score from severity counts: weighted penalties subtracted from 100,
/// clamped to [0, 100]
pub fn score_from_counts(
    weights: &SeverityWeights,
    critical: usize,
    major: usize,
    minor: usize,
) -> f32 {
    (100.0
        - weights.critical * critical as f32
        - weights.major * major as f32
        - weights.minor * minor as f32)
        .clamp(0.0, 100.0)
}

fn assemble(layout: &Layout, rules: &RuleSet, findings: Findings) -> Report {
    let Findings { violations, warnings } = findings;
    let critical = count_severity(&violations, Severity::Critical);
    let major = count_severity(&violations, Severity::Major);
    let minor = count_severity(&violations, Severity::Minor);

    Report {
        // Pass/fail is about criticals alone, independent of the score
        passed: critical == 0,
        score: score_from_counts(&rules.weights, critical, major, minor),
        summary: Summary {
            total_units: layout.boxes.len(),
            total_corridors: layout.corridors.len(),
            critical_violations: critical,
            major_violations: major,
            minor_violations: minor,
            warning_count: warnings.len(),
        },
        violations,
        warnings,
        rules: rules.clone(),
    }
}

fn count_severity(violations: &[super::types::Violation], severity: Severity) -> usize {
    violations.iter().filter(|v| v.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        let w = SeverityWeights::default();
        assert_eq!(score_from_counts(&w, 0, 0, 0), 100.0);
        assert_eq!(score_from_counts(&w, 1, 0, 0), 75.0);
        assert_eq!(score_from_counts(&w, 0, 5, 0), 50.0);
        assert_eq!(score_from_counts(&w, 1, 2, 3), 49.0);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let w = SeverityWeights::default();
        assert_eq!(score_from_counts(&w, 5, 0, 0), 0.0);
        assert_eq!(score_from_counts(&w, 10, 10, 10), 0.0);
    }

    #[test]
    fn test_score_respects_custom_weights() {
        let w = SeverityWeights {
            critical: 50.0,
            major: 5.0,
            minor: 1.0,
        };
        assert_eq!(score_from_counts(&w, 1, 2, 4), 36.0);
    }
}
