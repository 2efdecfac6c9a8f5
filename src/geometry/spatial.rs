//! Spatial indexing for placed units
//!
//! R-tree based candidate filtering for the pairwise audit checks, so the
//! quadratic scans only visit neighbors that could actually violate a
//! threshold.

use rstar::{RTree, RTreeObject, AABB};

use crate::model::Unit;

use super::types::Rect;

/// A unit's footprint in the R-tree, keyed back to its position in the layout
#[derive(Clone, Debug)]
pub struct IndexedUnit {
    /// Index into `Layout::boxes`
    pub index: usize,
    pub id: String,
    pub rect: Rect,
    envelope: AABB<[f32; 2]>,
}

impl IndexedUnit {
    pub fn new(index: usize, id: String, rect: Rect) -> Self {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.max_x(), rect.max_y()]);
        Self { index, id, rect, envelope }
    }
}

impl RTreeObject for IndexedUnit {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl rstar::PointDistance for IndexedUnit {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.envelope.distance_2(point)
    }
}

/// Build the unit index for one audit pass
///
/// Units with non-finite coordinates are skipped; the containment check
/// reports them through their layout index instead.
pub fn build_unit_index(units: &[Unit]) -> RTree<IndexedUnit> {
    let indexed: Vec<IndexedUnit> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.rect().is_finite())
        .map(|(i, u)| IndexedUnit::new(i, u.id.clone(), u.rect()))
        .collect();
    RTree::bulk_load(indexed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, x: f32, y: f32, w: f32, h: f32) -> Unit {
        Unit {
            id: id.to_string(),
            x,
            y,
            width: w,
            height: h,
            area: None,
            kind: None,
        }
    }

    #[test]
    fn test_index_finds_neighbors() {
        let units = vec![
            unit("a", 0.0, 0.0, 2.0, 2.0),
            unit("b", 10.0, 10.0, 2.0, 2.0),
        ];
        let tree = build_unit_index(&units);
        let query = AABB::from_corners([-1.0, -1.0], [3.0, 3.0]);
        let hits: Vec<_> = tree.locate_in_envelope_intersecting(&query).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_index_skips_non_finite_units() {
        let units = vec![unit("bad", f32::NAN, 0.0, 2.0, 2.0)];
        let tree = build_unit_index(&units);
        assert_eq!(tree.size(), 0);
    }
}
