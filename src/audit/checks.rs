//! Compliance checks
//!
//! Each check is independent and fail-soft: missing or empty inputs mean
//! "nothing to check" (or the one documented finding for that missing-data
//! case) rather than an error. The pairwise scans use R-tree candidate
//! filtering and Rayon, visiting each pair exactly once via the index order
//! guard.

use rayon::prelude::*;
use rstar::{RTree, AABB};

use crate::geometry::{
    boxes_overlap, point_distance, point_segment_distance, IndexedUnit, Point, Rect,
};
use crate::model::{CorridorType, Entrance, Layout};

use super::graph::{find_intersections, CorridorGraph};
use super::rules::RuleSet;
use super::types::{codes, Findings, Severity, Violation, Warning};

/// Check 1: corridor cross dimension against the width minimums
pub(crate) fn check_corridor_widths(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    if layout.corridors.is_empty() {
        findings.warnings.push(Warning {
            code: codes::NO_CORRIDORS,
            message: "layout has no corridors; circulation cannot be checked".to_string(),
            suggestion: Some("run corridor generation before auditing".to_string()),
            location: None,
        });
        return;
    }

    for (i, corridor) in layout.corridors.iter().enumerate() {
        let cross = corridor.cross_width();
        if !cross.is_finite() {
            continue;
        }
        let required = match corridor.kind {
            CorridorType::Main => rules.min_main_corridor_width,
            _ => rules.min_access_corridor_width,
        };
        if cross < required {
            findings.violations.push(Violation {
                code: codes::CORRIDOR_TOO_NARROW,
                severity: Severity::Major,
                message: format!(
                    "{} corridor is {:.2} m wide, minimum is {:.2} m",
                    corridor_kind_name(corridor.kind),
                    cross,
                    required
                ),
                location: Some(corridor.rect().center()),
                element: Some(corridor_label(layout, i)),
                required: Some(required),
                actual: Some(cross),
            });
        }
    }
}

/// Check 2: straight-line travel distance from each unit center to the
/// nearest entrance
///
/// The straight-line distance is a deliberate proxy; routed distance is out
/// of scope.
pub(crate) fn check_travel_distances(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    if layout.boxes.is_empty() {
        return;
    }

    let exits: Vec<Point> = layout
        .entrances
        .iter()
        .map(|e| e.position())
        .filter(|p| p.is_finite())
        .collect();
    if exits.is_empty() {
        // Egress cannot be assessed at all; one finding, not one per unit
        findings.violations.push(Violation {
            code: codes::NO_ENTRANCES,
            severity: Severity::Critical,
            message: "layout has no entrances; travel distance cannot be assessed".to_string(),
            location: None,
            element: None,
            required: None,
            actual: None,
        });
        return;
    }

    let limit = rules.max_travel_distance;
    for unit in &layout.boxes {
        let center = unit.center();
        if !center.is_finite() {
            continue;
        }
        let nearest = exits
            .iter()
            .map(|e| point_distance(center, *e))
            .fold(f32::INFINITY, f32::min);
        if nearest > limit {
            findings.violations.push(Violation {
                code: codes::TRAVEL_DISTANCE_EXCEEDED,
                severity: Severity::Critical,
                message: format!(
                    "unit {} is {:.1} m from the nearest exit, maximum is {:.1} m",
                    unit.id, nearest, limit
                ),
                location: Some(center),
                element: Some(unit.id.clone()),
                required: Some(limit),
                actual: Some(nearest),
            });
        } else if nearest > limit * 0.8 {
            findings.warnings.push(Warning {
                code: codes::TRAVEL_DISTANCE_NEAR_LIMIT,
                message: format!(
                    "unit {} is {:.1} m from the nearest exit, within 20% of the {:.1} m maximum",
                    unit.id, nearest, limit
                ),
                suggestion: Some("consider an additional exit or corridor".to_string()),
                location: Some(center),
            });
        }
    }
}

/// Check 3: dead-end corridor branches longer than the allowed run
pub(crate) fn check_dead_ends(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    if layout.corridors.is_empty() {
        return;
    }

    let graph = CorridorGraph::build(&layout.corridors);
    for dead_end in graph.dead_ends(&layout.entrances) {
        if dead_end.length > rules.max_dead_end_length {
            findings.violations.push(Violation {
                code: codes::DEAD_END_TOO_LONG,
                severity: Severity::Major,
                message: format!(
                    "dead-end corridor runs {:.1} m, maximum is {:.1} m",
                    dead_end.length, rules.max_dead_end_length
                ),
                location: Some(dead_end.position),
                element: None,
                required: Some(rules.max_dead_end_length),
                actual: Some(dead_end.length),
            });
        }
    }
}

/// Check 4: wall clearance per unit, with a separate finding for true overlap
pub(crate) fn check_wall_clearance(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    if layout.boxes.is_empty() || layout.walls.is_empty() {
        return;
    }

    let segments: Vec<(Point, Point)> = layout
        .walls
        .iter()
        .flat_map(|w| w.segments())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if segments.is_empty() {
        return;
    }

    let violations: Vec<Violation> = layout
        .boxes
        .par_iter()
        .flat_map(|unit| {
            let mut found = Vec::new();
            let center = unit.center();
            if !center.is_finite() {
                return found;
            }
            let half_span = (unit.width.max(unit.height) / 2.0).max(0.0);
            let wall_distance = segments
                .iter()
                .map(|(a, b)| point_segment_distance(center, *a, *b).0)
                .fold(f32::INFINITY, f32::min);
            let clearance = wall_distance - half_span;
            if !clearance.is_finite() {
                return found;
            }
            if clearance < rules.min_wall_clearance {
                found.push(Violation {
                    code: codes::INSUFFICIENT_WALL_CLEARANCE,
                    severity: Severity::Major,
                    message: format!(
                        "unit {} has {:.2} m wall clearance, minimum is {:.2} m",
                        unit.id, clearance, rules.min_wall_clearance
                    ),
                    location: Some(center),
                    element: Some(unit.id.clone()),
                    required: Some(rules.min_wall_clearance),
                    actual: Some(clearance),
                });
            }
            if clearance < 0.0 {
                found.push(Violation {
                    code: codes::WALL_OVERLAP,
                    severity: Severity::Critical,
                    message: format!("unit {} overlaps a wall", unit.id),
                    location: Some(center),
                    element: Some(unit.id.clone()),
                    required: Some(0.0),
                    actual: Some(clearance),
                });
            }
            found
        })
        .collect();
    findings.violations.extend(violations);
}

/// Check 5: pairwise unit overlap, R-tree filtered
pub(crate) fn check_unit_overlap(
    layout: &Layout,
    index: &RTree<IndexedUnit>,
    findings: &mut Findings,
) {
    if layout.boxes.len() < 2 {
        return;
    }

    let violations: Vec<Violation> = layout
        .boxes
        .par_iter()
        .enumerate()
        .flat_map(|(i, unit)| {
            let mut found = Vec::new();
            let rect = unit.rect();
            if !rect.is_finite() {
                return found;
            }
            let envelope =
                AABB::from_corners([rect.x, rect.y], [rect.max_x(), rect.max_y()]);
            for neighbor in index.locate_in_envelope_intersecting(&envelope) {
                // Each pair once
                if neighbor.index <= i {
                    continue;
                }
                if !boxes_overlap(&rect, &neighbor.rect) {
                    continue;
                }
                found.push(Violation {
                    code: codes::UNIT_OVERLAP,
                    severity: Severity::Critical,
                    message: format!("units {} and {} overlap", unit.id, neighbor.id),
                    location: Some(overlap_center(&rect, &neighbor.rect)),
                    element: Some(format!("{},{}", unit.id, neighbor.id)),
                    required: None,
                    actual: None,
                });
            }
            found
        })
        .collect();
    findings.violations.extend(violations);
}

/// Check 6: boundary gap between neighboring units
///
/// Only fires for pairs that do not overlap; overlapping pairs are already
/// reported as critical by the overlap check.
pub(crate) fn check_unit_spacing(
    layout: &Layout,
    rules: &RuleSet,
    index: &RTree<IndexedUnit>,
    findings: &mut Findings,
) {
    if layout.boxes.len() < 2 {
        return;
    }

    let spacing = rules.min_unit_spacing;
    let violations: Vec<Violation> = layout
        .boxes
        .par_iter()
        .enumerate()
        .flat_map(|(i, unit)| {
            let mut found = Vec::new();
            let rect = unit.rect();
            if !rect.is_finite() {
                return found;
            }
            let envelope = AABB::from_corners(
                [rect.x - spacing, rect.y - spacing],
                [rect.max_x() + spacing, rect.max_y() + spacing],
            );
            for neighbor in index.locate_in_envelope_intersecting(&envelope) {
                if neighbor.index <= i {
                    continue;
                }
                if boxes_overlap(&rect, &neighbor.rect) {
                    continue;
                }
                let gap = rect_gap(&rect, &neighbor.rect);
                if gap < spacing {
                    found.push(Violation {
                        code: codes::UNIT_SPACING,
                        severity: Severity::Minor,
                        message: format!(
                            "units {} and {} are {:.3} m apart, minimum spacing is {:.3} m",
                            unit.id, neighbor.id, gap, spacing
                        ),
                        location: Some(rect.center()),
                        element: Some(format!("{},{}", unit.id, neighbor.id)),
                        required: Some(spacing),
                        actual: Some(gap),
                    });
                }
            }
            found
        })
        .collect();
    findings.violations.extend(violations);
}

/// Check 7: every unit and corridor rectangle must lie inside the layout
/// envelope; the engine reports, it never clamps
pub(crate) fn check_bounds_containment(layout: &Layout, findings: &mut Findings) {
    for unit in &layout.boxes {
        let rect = unit.rect();
        if !rect.is_finite() || !layout.bounds.contains_rect(&rect) {
            findings.violations.push(Violation {
                code: codes::OUT_OF_BOUNDS,
                severity: Severity::Major,
                message: format!("unit {} extends outside the layout bounds", unit.id),
                location: rect.is_finite().then(|| rect.center()),
                element: Some(unit.id.clone()),
                required: None,
                actual: None,
            });
        }
    }
    for (i, corridor) in layout.corridors.iter().enumerate() {
        let rect = corridor.rect();
        if !rect.is_finite() || !layout.bounds.contains_rect(&rect) {
            findings.violations.push(Violation {
                code: codes::OUT_OF_BOUNDS,
                severity: Severity::Major,
                message: format!(
                    "corridor {} extends outside the layout bounds",
                    corridor_label(layout, i)
                ),
                location: rect.is_finite().then(|| rect.center()),
                element: Some(corridor_label(layout, i)),
                required: None,
                actual: None,
            });
        }
    }
}

/// Check 8: total unit area against the fire compartment maximum
pub(crate) fn check_fire_compartments(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    if layout.boxes.is_empty() {
        return;
    }

    let total: f32 = layout.boxes.iter().map(|u| u.floor_area()).sum();
    if !total.is_finite() || total <= rules.max_compartment_area {
        return;
    }
    let walls_needed =
        ((total / rules.max_compartment_area).ceil() as usize).saturating_sub(1);
    findings.warnings.push(Warning {
        code: codes::COMPARTMENT_TOO_LARGE,
        message: format!(
            "total unit area {:.0} m\u{b2} exceeds the {:.0} m\u{b2} compartment maximum",
            total, rules.max_compartment_area
        ),
        suggestion: Some(format!(
            "add {} fire separation wall(s), spaced at most {:.0} m apart",
            walls_needed, rules.fire_wall_interval
        )),
        location: None,
    });
}

/// Check 9: exit count, door widths, and exit separation
pub(crate) fn check_egress(layout: &Layout, rules: &RuleSet, findings: &mut Findings) {
    let count = layout.entrances.len();
    if count < rules.min_exits_per_floor {
        findings.violations.push(Violation {
            code: codes::INSUFFICIENT_EXITS,
            severity: Severity::Critical,
            message: format!(
                "layout has {} exit(s), minimum is {}",
                count, rules.min_exits_per_floor
            ),
            location: None,
            element: None,
            required: Some(rules.min_exits_per_floor as f32),
            actual: Some(count as f32),
        });
    }

    for (i, entrance) in layout.entrances.iter().enumerate() {
        let Some(width) = entrance.door_width() else {
            continue;
        };
        if width.is_finite() && width < rules.min_door_width {
            findings.violations.push(Violation {
                code: codes::EXIT_TOO_NARROW,
                severity: Severity::Major,
                message: format!(
                    "entrance {} is {:.2} m wide, minimum door width is {:.2} m",
                    i, width, rules.min_door_width
                ),
                location: Some(entrance.position()),
                element: Some(format!("entrance-{i}")),
                required: Some(rules.min_door_width),
                actual: Some(width),
            });
        }
    }

    // Pairwise separation; each over-limit pair gets its own warning
    let positions: Vec<Point> = layout
        .entrances
        .iter()
        .map(Entrance::position)
        .filter(|p| p.is_finite())
        .collect();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let separation = point_distance(positions[i], positions[j]);
            if separation > rules.max_distance_between_exits {
                findings.warnings.push(Warning {
                    code: codes::EXITS_TOO_FAR_APART,
                    message: format!(
                        "entrances {} and {} are {:.1} m apart, maximum is {:.1} m",
                        i, j, separation, rules.max_distance_between_exits
                    ),
                    suggestion: Some("add an exit between them".to_string()),
                    location: None,
                });
            }
        }
    }
}

/// Check 10: wheelchair turn clearance at corridor intersections
pub(crate) fn check_accessibility(
    layout: &Layout,
    rules: &RuleSet,
    index: &RTree<IndexedUnit>,
    findings: &mut Findings,
) {
    if layout.corridors.len() < 2 {
        return;
    }

    let radius = rules.wheelchair_turn_radius;
    let wall_segments: Vec<(Point, Point)> = layout
        .walls
        .iter()
        .flat_map(|w| w.segments())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();

    for intersection in find_intersections(&layout.corridors) {
        let mut clear_radius = f32::INFINITY;
        for neighbor in
            index.locate_within_distance([intersection.x, intersection.y], radius * radius)
        {
            clear_radius = clear_radius.min(neighbor.rect.distance_to_point(intersection));
        }
        for (a, b) in &wall_segments {
            clear_radius = clear_radius.min(point_segment_distance(intersection, *a, *b).0);
        }
        if clear_radius < radius {
            findings.warnings.push(Warning {
                code: codes::TURN_RADIUS_RESTRICTED,
                message: format!(
                    "corridor intersection has {:.2} m clear radius, wheelchair turning needs {:.2} m",
                    clear_radius, radius
                ),
                suggestion: Some("widen the junction or move nearby units and walls".to_string()),
                location: Some(intersection),
            });
        }
    }
}

/// Boundary gap between two non-overlapping rectangles (0 when touching)
fn rect_gap(a: &Rect, b: &Rect) -> f32 {
    let dx = (b.x - a.max_x()).max(a.x - b.max_x()).max(0.0);
    let dy = (b.y - a.max_y()).max(a.y - b.max_y()).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

/// Center of the shared rectangle of two overlapping rectangles
fn overlap_center(a: &Rect, b: &Rect) -> Point {
    let min_x = a.x.max(b.x);
    let max_x = a.max_x().min(b.max_x());
    let min_y = a.y.max(b.y);
    let max_y = a.max_y().min(b.max_y());
    Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

fn corridor_label(layout: &Layout, index: usize) -> String {
    layout.corridors[index]
        .id
        .clone()
        .unwrap_or_else(|| format!("corridor-{index}"))
}

fn corridor_kind_name(kind: CorridorType) -> &'static str {
    match kind {
        CorridorType::Main => "main",
        CorridorType::Access => "access",
        CorridorType::Connecting => "connecting",
        CorridorType::Vertical => "vertical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_gap() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let beside = Rect::new(2.5, 0.0, 2.0, 2.0);
        assert!((rect_gap(&a, &beside) - 0.5).abs() < 1e-6);

        let touching = Rect::new(2.0, 0.0, 2.0, 2.0);
        assert_eq!(rect_gap(&a, &touching), 0.0);

        let diagonal = Rect::new(5.0, 6.0, 2.0, 2.0);
        assert!((rect_gap(&a, &diagonal) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_center() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.0, 2.0, 2.0);
        let c = overlap_center(&a, &b);
        assert!((c.x - 1.5).abs() < 1e-6);
        assert!((c.y - 1.5).abs() < 1e-6);
    }
}
