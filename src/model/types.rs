//! Input data model for the audit engine
//!
//! These types are produced upstream (placement engine, corridor router, CAD
//! extraction) and are strictly read-only here: a validation pass never
//! mutates its layout.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Rect};

/// A placed rectangular storage unit ("ilot")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Unit {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Declared area, falling back to the footprint; never negative
    pub fn floor_area(&self) -> f32 {
        self.area
            .filter(|a| a.is_finite())
            .unwrap_or(self.width * self.height)
            .max(0.0)
    }
}

/// Circulation corridor category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorridorType {
    Main,
    Access,
    Connecting,
    Vertical,
}

/// A rectangular corridor segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type")]
    pub kind: CorridorType,
}

impl Corridor {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The corridor's cross dimension (the short side; the long side is its
    /// walking length)
    pub fn cross_width(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Centerline endpoints: midpoints of the two short sides
    pub fn centerline(&self) -> (Point, Point) {
        if self.width >= self.height {
            let y = self.y + self.height / 2.0;
            (Point::new(self.x, y), Point::new(self.x + self.width, y))
        } else {
            let x = self.x + self.width / 2.0;
            (Point::new(x, self.y), Point::new(x, self.y + self.height))
        }
    }
}

/// A wall, either a bare segment or a closed polygon outline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wall {
    Segment { start: Point, end: Point },
    Polygon { polygon: Vec<Point> },
}

impl Wall {
    /// The wall as line segments: the segment itself, or the closed edge ring
    /// of the polygon
    pub fn segments(&self) -> Vec<(Point, Point)> {
        match self {
            Wall::Segment { start, end } => vec![(*start, *end)],
            Wall::Polygon { polygon } => {
                if polygon.len() < 2 {
                    return vec![];
                }
                (0..polygon.len())
                    .map(|i| (polygon[i], polygon[(i + 1) % polygon.len()]))
                    .collect()
            }
        }
    }
}

/// An entrance/exit, either a point or a door region
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entrance {
    Point { x: f32, y: f32 },
    Region { bounds: Bounds },
}

impl Entrance {
    /// The single representative position used by distance checks: the point
    /// itself, or the region's min corner
    pub fn position(&self) -> Point {
        match self {
            Entrance::Point { x, y } => Point::new(*x, *y),
            Entrance::Region { bounds } => bounds.min_corner(),
        }
    }

    /// Door opening width for region entrances (a door region is thin across
    /// the wall, so the opening runs along its larger dimension)
    pub fn door_width(&self) -> Option<f32> {
        match self {
            Entrance::Point { .. } => None,
            Entrance::Region { bounds } => Some(bounds.width().max(bounds.height())),
        }
    }
}

/// A complete floor layout handed to the audit engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub boxes: Vec<Unit>,
    pub corridors: Vec<Corridor>,
    pub walls: Vec<Wall>,
    pub entrances: Vec<Entrance>,
    pub bounds: Bounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_centerline_orientation() {
        let horizontal = Corridor {
            id: None,
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 1.5,
            kind: CorridorType::Main,
        };
        let (a, b) = horizontal.centerline();
        assert_eq!((a.x, a.y), (0.0, 0.75));
        assert_eq!((b.x, b.y), (10.0, 0.75));
        assert_eq!(horizontal.cross_width(), 1.5);

        let vertical = Corridor {
            id: None,
            x: 4.0,
            y: 0.0,
            width: 1.2,
            height: 8.0,
            kind: CorridorType::Access,
        };
        let (a, b) = vertical.centerline();
        assert_eq!((a.x, a.y), (4.6, 0.0));
        assert_eq!((b.x, b.y), (4.6, 8.0));
    }

    #[test]
    fn test_entrance_position_variants() {
        let p = Entrance::Point { x: 3.0, y: 4.0 };
        assert_eq!(p.position(), Point::new(3.0, 4.0));
        assert!(p.door_width().is_none());

        let r = Entrance::Region {
            bounds: Bounds::new(1.0, 2.0, 2.2, 2.4),
        };
        assert_eq!(r.position(), Point::new(1.0, 2.0));
        assert!((r.door_width().unwrap() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_wall_polygon_segments_close_the_ring() {
        let wall = Wall::Polygon {
            polygon: vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
            ],
        };
        let segs = wall.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].1, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_unit_floor_area_fallback() {
        let mut u = Unit {
            id: "u1".to_string(),
            x: 0.0,
            y: 0.0,
            width: 3.0,
            height: 2.0,
            area: None,
            kind: None,
        };
        assert!((u.floor_area() - 6.0).abs() < 1e-6);
        u.area = Some(5.5);
        assert!((u.floor_area() - 5.5).abs() < 1e-6);
    }

    #[test]
    fn test_layout_deserializes_upstream_json() {
        let json = serde_json::json!({
            "boxes": [{ "id": "b1", "x": 1.0, "y": 1.0, "width": 2.0, "height": 2.0, "type": "STORAGE" }],
            "corridors": [{ "x": 0.0, "y": 4.0, "width": 10.0, "height": 1.5, "type": "MAIN" }],
            "walls": [
                { "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 10.0, "y": 0.0 } },
                { "polygon": [{ "x": 0.0, "y": 0.0 }, { "x": 1.0, "y": 0.0 }, { "x": 1.0, "y": 1.0 }] }
            ],
            "entrances": [
                { "x": 0.0, "y": 5.0 },
                { "bounds": { "min_x": 9.0, "min_y": 4.0, "max_x": 10.0, "max_y": 4.2 } }
            ],
            "bounds": { "min_x": 0.0, "min_y": 0.0, "max_x": 20.0, "max_y": 20.0 }
        });
        let layout: Layout = serde_json::from_value(json).unwrap();
        assert_eq!(layout.boxes.len(), 1);
        assert_eq!(layout.corridors[0].kind, CorridorType::Main);
        assert_eq!(layout.walls[1].segments().len(), 3);
        assert_eq!(layout.entrances[1].position(), Point::new(9.0, 4.0));
    }
}
