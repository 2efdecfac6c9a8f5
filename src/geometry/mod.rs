//! Geometry module for floor plan data
//!
//! Pure geometric primitives and the small kernel of shared functions used by
//! both the compliance audit and the live editor's collision feedback.
//!
//! # Submodules
//! - `types` - Core primitives (Point, Rect, Bounds)
//! - `kernel` - Shared pure geometry functions
//! - `spatial` - R-tree indexing over placed units

mod kernel;
mod spatial;
mod types;

pub use types::{Bounds, Point, Rect};

pub use kernel::{
    boxes_overlap, point_distance, point_segment_distance, polygon_area, polygon_centroid,
    polygon_intersects_box, snap_to_grid, snap_unit_to_grid,
};

pub use spatial::{build_unit_index, IndexedUnit};
