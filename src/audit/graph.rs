//! Corridor connectivity graph
//!
//! Derives an undirected graph from corridor centerlines to find dead-end
//! branches, and detects corridor intersections for the accessibility check.
//!
//! Nodes are centerline endpoints, merged by quantizing coordinates to a
//! small cell so endpoints that coincide within tolerance become one node. A
//! T-junction stem never shares an endpoint with its through corridor, so a
//! degree-1 node that lies inside another corridor's rectangle counts as a
//! junction, not a dead end.

use std::collections::{HashMap, HashSet};

use crate::geometry::{boxes_overlap, point_distance, Point, Rect};
use crate::model::{Corridor, Entrance};

/// Endpoint merge cell; endpoints produced by the corridor router coincide
/// within centimeters
const ENDPOINT_SNAP_CELL: f32 = 0.1;

/// A centerline endpoint within this distance of an entrance is an exit node
const EXIT_NODE_TOLERANCE: f32 = 2.0;

/// A corridor branch with no through-connection
#[derive(Debug, Clone)]
pub(crate) struct DeadEnd {
    /// The free endpoint of the branch
    pub position: Point,
    /// Walked centerline distance to the nearest junction, exit, or path end
    pub length: f32,
}

#[derive(Debug)]
pub(crate) struct CorridorGraph {
    nodes: Vec<Point>,
    /// Per node: (neighbor index, edge length)
    adjacency: Vec<Vec<(usize, f32)>>,
    /// Corridors that contributed each node's endpoints
    node_corridors: Vec<Vec<usize>>,
    /// (original corridor index, rect) for every walkable corridor
    corridor_rects: Vec<(usize, Rect)>,
}

impl CorridorGraph {
    pub fn build(corridors: &[Corridor]) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            node_corridors: Vec::new(),
            corridor_rects: Vec::new(),
        };
        let mut node_keys: HashMap<(i64, i64), usize> = HashMap::new();

        for (ci, corridor) in corridors.iter().enumerate() {
            let rect = corridor.rect();
            if !rect.is_finite() || rect.is_degenerate() {
                continue;
            }
            graph.corridor_rects.push((ci, rect));

            let (a, b) = corridor.centerline();
            let na = graph.intern_node(&mut node_keys, a, ci);
            let nb = graph.intern_node(&mut node_keys, b, ci);
            if na == nb {
                // Endpoints merged into one node: nothing to walk
                continue;
            }
            let length = point_distance(graph.nodes[na], graph.nodes[nb]);
            graph.adjacency[na].push((nb, length));
            graph.adjacency[nb].push((na, length));
        }

        graph
    }

    fn intern_node(
        &mut self,
        node_keys: &mut HashMap<(i64, i64), usize>,
        p: Point,
        corridor: usize,
    ) -> usize {
        let key = quantize_point(p);
        let idx = *node_keys.entry(key).or_insert_with(|| {
            self.nodes.push(p);
            self.adjacency.push(Vec::new());
            self.node_corridors.push(Vec::new());
            self.nodes.len() - 1
        });
        if !self.node_corridors[idx].contains(&corridor) {
            self.node_corridors[idx].push(corridor);
        }
        idx
    }

    fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// A node lying inside a corridor rectangle that did not contribute it
    /// connects into that corridor (T-junction stem)
    fn is_junction(&self, node: usize) -> bool {
        let p = self.nodes[node];
        self.corridor_rects.iter().any(|(ci, rect)| {
            !self.node_corridors[node].contains(ci) && rect.contains_point(p)
        })
    }

    fn is_exit(&self, node: usize, exit_points: &[Point]) -> bool {
        let p = self.nodes[node];
        exit_points
            .iter()
            .any(|e| point_distance(p, *e) <= EXIT_NODE_TOLERANCE)
    }

    /// Degree-1 nodes that are neither exits nor junctions, with the walked
    /// distance to the nearest node of degree >= 3, exit node, junction node,
    /// or the end of the path
    pub fn dead_ends(&self, entrances: &[Entrance]) -> Vec<DeadEnd> {
        let exit_points: Vec<Point> = entrances
            .iter()
            .map(|e| e.position())
            .filter(|p| p.is_finite())
            .collect();

        let mut found = Vec::new();
        for start in 0..self.nodes.len() {
            if self.degree(start) != 1
                || self.is_exit(start, &exit_points)
                || self.is_junction(start)
            {
                continue;
            }

            let mut visited: HashSet<usize> = HashSet::from([start]);
            let mut prev = usize::MAX;
            let mut current = start;
            let mut length = 0.0f32;
            loop {
                let next = self.adjacency[current]
                    .iter()
                    .find(|(n, _)| *n != prev && !visited.contains(n));
                let Some(&(next, edge_len)) = next else {
                    break;
                };
                length += edge_len;
                visited.insert(next);
                prev = current;
                current = next;
                if self.degree(current) >= 3
                    || self.is_exit(current, &exit_points)
                    || self.is_junction(current)
                {
                    break;
                }
            }

            found.push(DeadEnd {
                position: self.nodes[start],
                length,
            });
        }
        found
    }
}

fn quantize_point(p: Point) -> (i64, i64) {
    (
        (p.x / ENDPOINT_SNAP_CELL).round() as i64,
        (p.y / ENDPOINT_SNAP_CELL).round() as i64,
    )
}

/// Corridor intersections for the accessibility check: every overlapping
/// corridor pair yields one intersection at the center of the shared
/// rectangle
pub(crate) fn find_intersections(corridors: &[Corridor]) -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..corridors.len() {
        let a = corridors[i].rect();
        for b in corridors.iter().skip(i + 1).map(|c| c.rect()) {
            if !boxes_overlap(&a, &b) {
                continue;
            }
            let min_x = a.x.max(b.x);
            let max_x = a.max_x().min(b.max_x());
            let min_y = a.y.max(b.y);
            let max_y = a.max_y().min(b.max_y());
            points.push(Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CorridorType;

    fn corridor(x: f32, y: f32, w: f32, h: f32) -> Corridor {
        Corridor {
            id: None,
            x,
            y,
            width: w,
            height: h,
            kind: CorridorType::Main,
        }
    }

    fn entrance(x: f32, y: f32) -> Entrance {
        Entrance::Point { x, y }
    }

    #[test]
    fn test_straight_corridor_between_exits_has_no_dead_ends() {
        let corridors = vec![corridor(0.0, 0.0, 20.0, 1.5)];
        let graph = CorridorGraph::build(&corridors);
        let entrances = vec![entrance(0.0, 0.75), entrance(20.0, 0.75)];
        assert!(graph.dead_ends(&entrances).is_empty());
    }

    #[test]
    fn test_isolated_corridor_yields_dead_end_per_free_endpoint() {
        let corridors = vec![corridor(0.0, 0.0, 20.0, 1.5)];
        let graph = CorridorGraph::build(&corridors);
        let dead_ends = graph.dead_ends(&[]);
        assert_eq!(dead_ends.len(), 2);
        for de in &dead_ends {
            assert!((de.length - 20.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_t_junction_stem() {
        // Stem meets the main corridor edge-on: its lower centerline endpoint
        // sits on the main rectangle boundary, not on a shared endpoint
        let corridors = vec![
            corridor(0.0, 0.0, 20.0, 1.5),
            corridor(9.25, 1.5, 1.5, 10.0),
        ];
        let graph = CorridorGraph::build(&corridors);
        let entrances = vec![entrance(0.0, 0.75), entrance(20.0, 0.75)];
        let dead_ends = graph.dead_ends(&entrances);
        // Only the stem's far endpoint dangles; the junction side connects
        // into the main corridor
        assert_eq!(dead_ends.len(), 1);
        assert!((dead_ends[0].position.y - 11.5).abs() < 1e-4);
        assert!((dead_ends[0].length - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_chained_corridors_walk_to_exit() {
        // Two collinear corridors sharing an endpoint; an exit at the far end
        let corridors = vec![
            corridor(0.0, 0.0, 10.0, 1.5),
            corridor(10.0, 0.0, 10.0, 1.5),
        ];
        let graph = CorridorGraph::build(&corridors);
        let entrances = vec![entrance(20.0, 0.75)];
        let dead_ends = graph.dead_ends(&entrances);
        assert_eq!(dead_ends.len(), 1);
        assert!((dead_ends[0].position.x - 0.0).abs() < 1e-4);
        // Walks through the shared degree-2 node to the exit
        assert!((dead_ends[0].length - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_crossing_corridors_intersect_at_shared_center() {
        let corridors = vec![
            corridor(0.0, 4.0, 20.0, 1.5),
            corridor(9.0, 0.0, 1.5, 12.0),
        ];
        let points = find_intersections(&corridors);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 9.75).abs() < 1e-4);
        assert!((points[0].y - 4.75).abs() < 1e-4);
    }

    #[test]
    fn test_separated_corridors_do_not_intersect() {
        let corridors = vec![
            corridor(0.0, 0.0, 5.0, 1.5),
            corridor(10.0, 10.0, 5.0, 1.5),
        ];
        assert!(find_intersections(&corridors).is_empty());
    }
}
