//! Wall and opening polygon derivation.
//!
//! Both walls and openings use the same perpendicular, computed from the
//! wall's own `a → b` direction: `(-dy, dx) / len * thickness / 2`. Opening
//! rectangles therefore always sit exactly inside their wall's band.
//!
//! A zero-length wall has no direction; its perpendicular is `(0, 0)` and all
//! wall parameters collapse onto `a`, so nothing here ever produces NaN.

use glam::DVec2;

use super::types::*;
use crate::ir::{Level, Opening, Point, Wall};

fn to_vec(p: Point) -> DVec2 {
    DVec2::new(p.x as f64, p.y as f64)
}

/// Centreline endpoints, length and half-thickness perpendicular of a wall.
struct WallFrame {
    a: DVec2,
    b: DVec2,
    length: f64,
    perp: DVec2,
}

impl WallFrame {
    fn of(wall: &Wall) -> Self {
        let a = to_vec(wall.a);
        let b = to_vec(wall.b);
        let dir = b - a;
        let length = dir.length();
        let perp = if length > 0.0 {
            dir.perp() / length * (wall.thickness_mm as f64 / 2.0)
        } else {
            DVec2::ZERO
        };
        Self {
            a,
            b,
            length,
            perp,
        }
    }

    /// Point at `distance` mm from `a` along the wall.
    fn at(&self, distance: f64) -> DVec2 {
        let t = if self.length > 0.0 {
            distance / self.length
        } else {
            0.0
        };
        self.a.lerp(self.b, t)
    }
}

pub fn derive_wall_geometry(wall: &Wall) -> WallGeometry {
    let f = WallFrame::of(wall);
    WallGeometry {
        wall_id: wall.id.clone(),
        outline: Polygon {
            points: vec![
                (f.a + f.perp).into(),
                (f.b + f.perp).into(),
                (f.b - f.perp).into(),
                (f.a - f.perp).into(),
            ],
        },
        centerline: Segment {
            start: f.a.into(),
            end: f.b.into(),
        },
        thickness: wall.thickness_mm as f64,
    }
}

/// Rectangle of `opening` on `wall`.
///
/// The caller is responsible for passing the opening's own wall; the
/// interval is not clamped, so an opening overrunning its wall yields a
/// rectangle extending past the wall end.
pub fn derive_opening_geometry(opening: &Opening, wall: &Wall) -> OpeningGeometry {
    let f = WallFrame::of(wall);
    let offset = opening.offset_mm as f64;
    let width = opening.width_mm as f64;
    let start = f.at(offset);
    let end = f.at(offset + width);

    OpeningGeometry {
        opening_id: opening.id.clone(),
        wall_id: wall.id.clone(),
        kind: opening.kind,
        rectangle: OpeningRect {
            top_left: (start + f.perp).into(),
            top_right: (end + f.perp).into(),
            bottom_right: (end - f.perp).into(),
            bottom_left: (start - f.perp).into(),
        },
        width,
        position: f.at(offset + width / 2.0).into(),
    }
}

pub fn derive_walls_geometry(walls: &[Wall]) -> Vec<WallGeometry> {
    walls.iter().map(derive_wall_geometry).collect()
}

/// Derive every opening, failing on the first unresolved `wall_id`.
///
/// Stricter than validation on purpose: only call this on wall-resolvable
/// data.
pub fn derive_openings_geometry(
    openings: &[Opening],
    walls: &[Wall],
) -> Result<Vec<OpeningGeometry>, GeometryError> {
    openings
        .iter()
        .map(|opening| {
            let wall = walls
                .iter()
                .find(|w| w.id == opening.wall_id)
                .ok_or_else(|| GeometryError::WallNotFound {
                    opening_id: opening.id.clone(),
                    wall_id: opening.wall_id.clone(),
                })?;
            Ok(derive_opening_geometry(opening, wall))
        })
        .collect()
}

pub fn derive_level_geometry(level: &Level) -> Result<LevelGeometry, GeometryError> {
    Ok(LevelGeometry {
        level_id: level.id.clone(),
        walls: derive_walls_geometry(&level.walls),
        openings: derive_openings_geometry(&level.openings, &level.walls)?,
    })
}

/// Bounding box over every outline point; `None` when there are no points.
pub fn bounds_of(walls: &[WallGeometry]) -> Option<Bounds> {
    let mut points = walls.iter().flat_map(|w| w.outline.points.iter());
    let first = points.next()?;
    let init = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    Some(points.fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x),
        min_y: b.min_y.min(p.y),
        max_x: b.max_x.max(p.x),
        max_y: b.max_y.max(p.y),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::OpeningType;
    use approx::assert_relative_eq;

    fn wall(a: (i64, i64), b: (i64, i64), thickness: i64) -> Wall {
        Wall {
            id: "w1".to_string(),
            a: Point::new(a.0, a.1),
            b: Point::new(b.0, b.1),
            thickness_mm: thickness,
            height_mm: 2700,
        }
    }

    fn window(offset: i64, width: i64) -> Opening {
        Opening {
            id: "o1".to_string(),
            wall_id: "w1".to_string(),
            kind: OpeningType::Window,
            offset_mm: offset,
            width_mm: width,
            height_mm: 1200,
            sill_height_mm: 900,
        }
    }

    fn assert_point(p: GeomPoint, x: f64, y: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }

    #[test]
    fn horizontal_wall_outline() {
        let g = derive_wall_geometry(&wall((0, 0), (5000, 0), 200));
        assert_eq!(g.outline.len(), 4);
        assert_point(g.outline.points[0], 0.0, 100.0);
        assert_point(g.outline.points[1], 5000.0, 100.0);
        assert_point(g.outline.points[2], 5000.0, -100.0);
        assert_point(g.outline.points[3], 0.0, -100.0);
        assert_point(g.centerline.start, 0.0, 0.0);
        assert_point(g.centerline.end, 5000.0, 0.0);
        assert_eq!(g.thickness, 200.0);
    }

    #[test]
    fn vertical_wall_perpendicular_points_left_of_direction() {
        let g = derive_wall_geometry(&wall((0, 0), (0, 4000), 300));
        assert_point(g.outline.points[0], -150.0, 0.0);
        assert_point(g.outline.points[2], 150.0, 4000.0);
    }

    #[test]
    fn diagonal_wall_keeps_half_thickness_offset() {
        let g = derive_wall_geometry(&wall((0, 0), (3000, 4000), 200));
        let a_plus = DVec2::from(g.outline.points[0]);
        let a_minus = DVec2::from(g.outline.points[3]);
        assert_relative_eq!(a_plus.distance(a_minus), 200.0, epsilon = 1e-9);
        assert_point(g.outline.points[0], -80.0, 60.0);
    }

    #[test]
    fn zero_length_wall_has_no_nan() {
        let g = derive_wall_geometry(&wall((10, 20), (10, 20), 200));
        for p in &g.outline.points {
            assert_point(*p, 10.0, 20.0);
        }
        let o = derive_opening_geometry(&window(0, 900), &wall((10, 20), (10, 20), 200));
        assert!(!o.position.x.is_nan() && !o.position.y.is_nan());
        assert_point(o.rectangle.top_right, 10.0, 20.0);
    }

    #[test]
    fn opening_rectangle_sits_in_wall_band() {
        let w = wall((0, 0), (5000, 0), 200);
        let g = derive_opening_geometry(&window(2000, 1200), &w);
        assert_point(g.rectangle.top_left, 2000.0, 100.0);
        assert_point(g.rectangle.top_right, 3200.0, 100.0);
        assert_point(g.rectangle.bottom_right, 3200.0, -100.0);
        assert_point(g.rectangle.bottom_left, 2000.0, -100.0);
        assert_point(g.position, 2600.0, 0.0);
        assert_eq!(g.width, 1200.0);
        assert_eq!(g.kind, OpeningType::Window);
        assert_eq!(g.rectangle.to_polygon().len(), 4);
    }

    #[test]
    fn opening_on_reversed_wall_measures_from_a() {
        let w = wall((4000, 0), (0, 0), 200);
        let g = derive_opening_geometry(&window(1000, 1000), &w);
        assert_point(g.position, 2500.0, 0.0);
        assert_point(g.rectangle.top_left, 3000.0, -100.0);
    }

    #[test]
    fn derivation_is_deterministic() {
        let w = wall((120, -40), (3300, 2900), 250);
        assert_eq!(derive_wall_geometry(&w), derive_wall_geometry(&w));
    }

    #[test]
    fn unresolved_wall_fails_batch() {
        let walls = vec![wall((0, 0), (5000, 0), 200)];
        let mut orphan = window(0, 900);
        orphan.wall_id = "w9".to_string();
        let err = derive_openings_geometry(&[window(0, 900), orphan], &walls)
            .expect_err("should fail");
        assert_eq!(
            err,
            GeometryError::WallNotFound {
                opening_id: "o1".to_string(),
                wall_id: "w9".to_string()
            }
        );
    }

    #[test]
    fn bounds_cover_all_outlines() {
        let walls = derive_walls_geometry(&[
            wall((0, 0), (5000, 0), 200),
            wall((5000, 0), (5000, 4000), 200),
        ]);
        let b = bounds_of(&walls).expect("non-empty");
        assert_relative_eq!(b.min_x, 0.0);
        assert_relative_eq!(b.min_y, -100.0);
        assert_relative_eq!(b.max_x, 5100.0);
        assert_relative_eq!(b.max_y, 4000.0);
        assert!(bounds_of(&[]).is_none());
    }
}
