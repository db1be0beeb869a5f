//! Field-level change-sets for walls and openings.
//!
//! A patch names the subset of fields an edit touches; `None` fields are left
//! alone. Patches serialize as partial entities (`{"offsetMm": 1200}`), which
//! is also the shape of a validation issue's suggested fix.

use serde::{Deserialize, Serialize};

use super::types::{Opening, OpeningType, Point, Wall};

/// Partial update of a [`Wall`]. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<i64>,
}

/// Partial update of an [`Opening`]. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OpeningType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_mm: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_height_mm: Option<i64>,
}

impl OpeningPatch {
    pub fn offset(offset_mm: i64) -> Self {
        Self {
            offset_mm: Some(offset_mm),
            ..Self::default()
        }
    }
}

/// A change-set that can be applied to, and captured from, an entity.
pub trait EntityPatch: Clone + std::fmt::Debug {
    type Target;

    /// Shallow-merge the present fields into `target`.
    fn apply(&self, target: &mut Self::Target);

    /// Current values of exactly the fields present in `self`.
    fn capture(&self, target: &Self::Target) -> Self;

    fn is_empty(&self) -> bool;
}

impl EntityPatch for WallPatch {
    type Target = Wall;

    fn apply(&self, wall: &mut Wall) {
        if let Some(a) = self.a {
            wall.a = a;
        }
        if let Some(b) = self.b {
            wall.b = b;
        }
        if let Some(t) = self.thickness_mm {
            wall.thickness_mm = t;
        }
        if let Some(h) = self.height_mm {
            wall.height_mm = h;
        }
    }

    fn capture(&self, wall: &Wall) -> Self {
        Self {
            a: self.a.map(|_| wall.a),
            b: self.b.map(|_| wall.b),
            thickness_mm: self.thickness_mm.map(|_| wall.thickness_mm),
            height_mm: self.height_mm.map(|_| wall.height_mm),
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl EntityPatch for OpeningPatch {
    type Target = Opening;

    fn apply(&self, opening: &mut Opening) {
        if let Some(wall_id) = &self.wall_id {
            opening.wall_id.clone_from(wall_id);
        }
        if let Some(kind) = self.kind {
            opening.kind = kind;
        }
        if let Some(v) = self.offset_mm {
            opening.offset_mm = v;
        }
        if let Some(v) = self.width_mm {
            opening.width_mm = v;
        }
        if let Some(v) = self.height_mm {
            opening.height_mm = v;
        }
        if let Some(v) = self.sill_height_mm {
            opening.sill_height_mm = v;
        }
    }

    fn capture(&self, opening: &Opening) -> Self {
        Self {
            wall_id: self.wall_id.as_ref().map(|_| opening.wall_id.clone()),
            kind: self.kind.map(|_| opening.kind),
            offset_mm: self.offset_mm.map(|_| opening.offset_mm),
            width_mm: self.width_mm.map(|_| opening.width_mm),
            height_mm: self.height_mm.map(|_| opening.height_mm),
            sill_height_mm: self.sill_height_mm.map(|_| opening.sill_height_mm),
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_opening() -> Opening {
        Opening {
            id: "o1".to_string(),
            wall_id: "w1".to_string(),
            kind: OpeningType::Window,
            offset_mm: 100,
            width_mm: 1200,
            height_mm: 1200,
            sill_height_mm: 900,
        }
    }

    #[test]
    fn apply_touches_only_present_fields() {
        let mut opening = make_opening();
        let patch = OpeningPatch {
            width_mm: Some(1500),
            sill_height_mm: Some(800),
            ..OpeningPatch::default()
        };
        patch.apply(&mut opening);
        assert_eq!(opening.width_mm, 1500);
        assert_eq!(opening.sill_height_mm, 800);
        assert_eq!(opening.offset_mm, 100);
        assert_eq!(opening.height_mm, 1200);
    }

    #[test]
    fn capture_mirrors_patch_shape() {
        let wall = Wall {
            id: "w1".to_string(),
            a: Point::new(0, 0),
            b: Point::new(4000, 0),
            thickness_mm: 200,
            height_mm: 2700,
        };
        let patch = WallPatch {
            b: Some(Point::new(5000, 0)),
            ..WallPatch::default()
        };
        let captured = patch.capture(&wall);
        assert_eq!(
            captured,
            WallPatch {
                b: Some(Point::new(4000, 0)),
                ..WallPatch::default()
            }
        );
    }

    #[test]
    fn patch_serializes_as_partial_entity() {
        let value = serde_json::to_value(OpeningPatch::offset(800)).expect("to_value");
        assert_eq!(value, serde_json::json!({"offsetMm": 800}));
        assert!(OpeningPatch::default().is_empty());
        assert!(!OpeningPatch::offset(0).is_empty());
    }
}
