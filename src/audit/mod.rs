//! Compliance audit pipeline
//!
//! A fixed sequence of independent checks over a `Layout` and a `RuleSet`,
//! accumulating violations and warnings into a scored pass/fail report.
//!
//! # Submodules
//! - `rules` - Thresholds, severity weights, construction-time validation
//! - `types` - Violation, warning, summary, and report structures
//! - `graph` - Corridor connectivity (dead ends, intersections)
//! - `checks` - The individual compliance checks
//! - `runner` - `validate` entry point and report assembly

mod checks;
mod graph;
mod rules;
mod runner;
mod types;

pub use rules::{RuleError, RuleSet, SeverityWeights};
pub use runner::{score_from_counts, validate};
pub use types::{codes, Report, Severity, Summary, Violation, Warning};
