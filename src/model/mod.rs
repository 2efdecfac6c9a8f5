//! Read-only input model consumed by the audit engine

mod types;

pub use types::{Corridor, CorridorType, Entrance, Layout, Unit, Wall};
