//! Floorplan editor core.
//!
//! The pipeline a host UI drives:
//!
//! - [`ir`] — the project data model and its schema checks
//! - [`validation`] — structural and dimensional rules over a whole project
//! - [`geometry`] — wall outlines and opening rectangles for rendering
//! - [`history`] — reversible commands and the undo/redo stack
//! - [`editor`] — one editing session tying the above together
//!
//! [`project`] saves and loads project files, [`config`] and [`logging`] set
//! up the ambient environment for a host binary.

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod ir;
pub mod logging;
pub mod project;
pub mod validation;

pub use config::EditorConfig;
pub use editor::{EditorState, EditorTool, Selection};
pub use error::AppError;
pub use history::{Command, CommandError, CommandHistory};
pub use ir::{Level, Opening, OpeningType, Point, Project, Wall};
pub use validation::{validate_project, ValidationIssue};
