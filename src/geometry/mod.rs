//! Geometry derivation — IR entities to renderable polygons.
//!
//! # Module structure
//!
//! ```text
//! geometry/
//! ├── types.rs  — derived shapes (outlines, opening rectangles, bounds) and GeometryError
//! └── derive.rs — pure derivation functions over walls, openings and levels
//! ```
//!
//! Everything here borrows the IR read-only. Renderers must re-derive after
//! every committed command and must not mutate returned geometry.

pub mod derive;
pub mod types;

pub use derive::{
    bounds_of, derive_level_geometry, derive_opening_geometry, derive_openings_geometry,
    derive_wall_geometry, derive_walls_geometry,
};
pub use types::{
    Bounds, GeomPoint, GeometryError, LevelGeometry, OpeningGeometry, OpeningRect, Polygon,
    Segment, WallGeometry,
};
