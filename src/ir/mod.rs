//! Floor-plan intermediate representation (IR).
//!
//! - [`types`]  — entity structs: project, level, wall, opening, point
//! - [`schema`] — shape/range checks for untrusted data (`parse_project`)
//! - [`patch`]  — typed partial updates used by commands and suggested fixes
//! - [`ids`]    — id patterns and allocation

pub mod ids;
pub mod patch;
pub mod schema;
pub mod types;

pub use ids::{next_level_id, next_opening_id, next_wall_id, IdKind};
pub use patch::{EntityPatch, OpeningPatch, WallPatch};
pub use schema::{
    create_empty_project, parse_project, parse_project_str, safe_parse_project, SafeParse,
    SchemaError, SchemaIssue,
};
pub use types::{Level, Opening, OpeningType, Point, Project, Wall};
