//! Floor-plan IR entity types.
//!
//! These are both the in-memory and the on-disk representation of a project.
//! All lengths and coordinates are integer millimetres. See the JSON layout in
//! `project::serialization` for how they appear in a saved file.
//!
//! The types carry no range checks of their own: [`crate::ir::schema`] checks
//! shapes and ranges when data enters the system, and
//! [`crate::validation`] checks the cross-entity invariants.

use serde::{Deserialize, Serialize};

/// Minimum wall thickness accepted by the schema, in mm.
pub const WALL_THICKNESS_MIN: i64 = 100;
/// Maximum wall thickness accepted by the schema, in mm.
pub const WALL_THICKNESS_MAX: i64 = 500;
/// Minimum wall height accepted by the schema, in mm.
pub const WALL_HEIGHT_MIN: i64 = 1800;
/// Maximum wall height accepted by the schema, in mm.
pub const WALL_HEIGHT_MAX: i64 = 4000;
/// Wall height used when the field is absent.
pub const WALL_HEIGHT_DEFAULT: i64 = 2700;

pub const OPENING_WIDTH_MIN: i64 = 600;
pub const OPENING_WIDTH_MAX: i64 = 3000;
pub const OPENING_HEIGHT_MIN: i64 = 600;
pub const OPENING_HEIGHT_MAX: i64 = 2400;
pub const OPENING_SILL_MIN: i64 = 0;
pub const OPENING_SILL_MAX: i64 = 1500;

/// Largest coordinate or offset magnitude the schema accepts (`2^53 - 1`, the
/// JSON safe-integer range).
pub const COORD_LIMIT_MM: i64 = 9_007_199_254_740_991;

/// The only unit system a project can be expressed in.
pub const UNITS_MM: &str = "mm";

/// A 2D point in integer millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A straight wall segment between centreline points `a` and `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    /// Project-unique identifier (`w<digits>`).
    pub id: String,
    pub a: Point,
    pub b: Point,
    pub thickness_mm: i64,
    #[serde(default = "default_wall_height")]
    pub height_mm: i64,
}

fn default_wall_height() -> i64 {
    WALL_HEIGHT_DEFAULT
}

impl Wall {
    /// Euclidean centreline length `|b - a|` in millimetres.
    pub fn length(&self) -> f64 {
        let dx = self.b.x as f64 - self.a.x as f64;
        let dy = self.b.y as f64 - self.a.y as f64;
        dx.hypot(dy)
    }
}

/// Kind of opening placed in a wall.
///
/// Serialized as a lowercase string (`"door"`, `"window"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    Door,
    Window,
}

impl OpeningType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
        }
    }
}

/// A door or window placed on a wall.
///
/// The opening occupies the interval `[offset_mm, offset_mm + width_mm]`
/// measured from `wall.a` towards `wall.b`.
///
/// The `type` field uses `#[serde(rename = "type")]` because the JSON layout
/// uses `"type"` as the key, while the Rust field is named `kind` to avoid the
/// reserved keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    /// Project-unique identifier (`o<digits>`).
    pub id: String,
    /// Id of the wall this opening sits on; must resolve within the same level.
    pub wall_id: String,
    #[serde(rename = "type")]
    pub kind: OpeningType,
    pub offset_mm: i64,
    pub width_mm: i64,
    pub height_mm: i64,
    #[serde(default)]
    pub sill_height_mm: i64,
}

impl Opening {
    /// End of the occupied wall interval, saturating at the `i64` bounds.
    pub fn end_mm(&self) -> i64 {
        self.offset_mm.saturating_add(self.width_mm)
    }
}

/// One floor of the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Project-unique identifier (`l<digits>`).
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub openings: Vec<Opening>,
}

impl Level {
    pub fn find_wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn find_opening(&self, id: &str) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }
}

/// The aggregate root: the single mutable document that commands operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier (`p<digits>`).
    pub id: String,
    pub name: String,
    /// Always `"mm"`.
    pub units: String,
    /// At least one level.
    pub levels: Vec<Level>,
    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC 3339 last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Project {
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn level_mut(&mut self, index: usize) -> Option<&mut Level> {
        self.levels.get_mut(index)
    }
}
