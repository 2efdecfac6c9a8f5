//! Compliance and geometry audit for generated storage-facility floor plans
//!
//! The engine consumes a finished [`Layout`] (placed units, corridors, walls,
//! entrances) together with a [`RuleSet`] of life-safety thresholds and
//! returns a [`Report`]: violations and warnings per check, a numeric score,
//! and pass/fail. It performs no I/O and never mutates its input; layout
//! generation, corridor routing, rendering, and export are external
//! collaborators.
//!
//! ```
//! use floorplan_audit::{validate, Layout, RuleSet};
//! use floorplan_audit::geometry::Bounds;
//!
//! let layout = Layout {
//!     boxes: vec![],
//!     corridors: vec![],
//!     walls: vec![],
//!     entrances: vec![],
//!     bounds: Bounds::new(0.0, 0.0, 10.0, 10.0),
//! };
//! let report = validate(&layout, &RuleSet::default());
//! assert!(!report.passed);
//! ```

pub mod audit;
pub mod geometry;
pub mod model;

pub use audit::{codes, validate, Report, RuleError, RuleSet, Severity, SeverityWeights, Summary, Violation, Warning};
pub use model::{Corridor, CorridorType, Entrance, Layout, Unit, Wall};
