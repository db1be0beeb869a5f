//! Derived geometry types handed to renderers and exporters.
//!
//! Everything here is recomputed from the IR on demand and never persisted.
//! Coordinates are `f64` millimetres; the integer IR is only widened here.

use glam::DVec2;
use serde::Serialize;

use crate::ir::OpeningType;

// ── GeometryError ─────────────────────────────────────────────────────────────

/// Errors produced by the geometry derivation layer.
///
/// Implements [`serde::Serialize`] so it can be forwarded to a host UI as a
/// JSON value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum GeometryError {
    /// An opening references a wall that is not in the supplied wall list.
    /// Geometry is only derived for wall-resolvable data; this is a caller
    /// contract violation, not a user-facing data error.
    #[error("Opening {opening_id} references unknown wall {wall_id}")]
    WallNotFound { opening_id: String, wall_id: String },
}

// ── Primitives ────────────────────────────────────────────────────────────────

/// A point in derived (floating-point) geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GeomPoint {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for GeomPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<GeomPoint> for DVec2 {
    fn from(p: GeomPoint) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Closed polygon; serialized as a bare point array.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<GeomPoint>,
}

impl Polygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: GeomPoint,
    pub end: GeomPoint,
}

// ── Derived entities ──────────────────────────────────────────────────────────

/// Renderable outline of a wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallGeometry {
    pub wall_id: String,
    /// `[a + perp, b + perp, b - perp, a - perp]`.
    pub outline: Polygon,
    pub centerline: Segment,
    pub thickness: f64,
}

/// Corners of an opening cut into its wall's thickness band.
///
/// "Top" is the `+perp` side of the wall, "left" the side nearer `wall.a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningRect {
    pub top_left: GeomPoint,
    pub top_right: GeomPoint,
    pub bottom_right: GeomPoint,
    pub bottom_left: GeomPoint,
}

impl OpeningRect {
    /// Corners in outline winding order.
    pub fn to_polygon(&self) -> Polygon {
        Polygon {
            points: vec![
                self.top_left,
                self.top_right,
                self.bottom_right,
                self.bottom_left,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningGeometry {
    pub opening_id: String,
    pub wall_id: String,
    #[serde(rename = "type")]
    pub kind: OpeningType,
    pub rectangle: OpeningRect,
    pub width: f64,
    /// Label/handle anchor at the middle of the opening along the wall.
    pub position: GeomPoint,
}

/// All derived geometry of one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGeometry {
    pub level_id: String,
    pub walls: Vec<WallGeometry>,
    pub openings: Vec<OpeningGeometry>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> GeomPoint {
        GeomPoint {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_error_display() {
        let e = GeometryError::WallNotFound {
            opening_id: "o1".into(),
            wall_id: "w9".into(),
        };
        assert_eq!(e.to_string(), "Opening o1 references unknown wall w9");
    }

    #[test]
    fn polygon_serializes_as_point_array() {
        let polygon = Polygon {
            points: vec![GeomPoint { x: 1.0, y: 2.0 }],
        };
        let value = serde_json::to_value(&polygon).expect("serialize");
        assert_eq!(value, serde_json::json!([{"x": 1.0, "y": 2.0}]));
    }

    #[test]
    fn bounds_dimensions() {
        let b = Bounds {
            min_x: -100.0,
            min_y: 0.0,
            max_x: 900.0,
            max_y: 400.0,
        };
        assert_eq!(b.width(), 1000.0);
        assert_eq!(b.height(), 400.0);
        assert_eq!(b.center(), GeomPoint { x: 400.0, y: 200.0 });
    }
}
