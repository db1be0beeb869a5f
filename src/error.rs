//! Crate-level error type for host applications.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so a UI can
//! pattern-match on a stable `kind` string.

use crate::config::ConfigError;
use crate::geometry::GeometryError;
use crate::history::CommandError;
use crate::ir::SchemaError;

/// Top-level error returned to host applications.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// A project file path does not exist on disk.
    #[error("file not found")]
    FileNotFound,

    /// Project data failed schema validation.
    #[error("{0}")]
    InvalidProject(String),

    /// A command could not be built or run.
    #[error("{0}")]
    Command(String),

    #[error("{0}")]
    Geometry(String),

    #[error("{0}")]
    Config(String),

    /// A generic I/O error, stringified so it remains serializable.
    #[error("{0}")]
    Io(String),

    /// The project file could not be read.
    #[error("{0}")]
    ProjectLoad(String),

    /// The project file could not be written.
    #[error("{0}")]
    ProjectSave(String),
}

impl From<SchemaError> for AppError {
    fn from(e: SchemaError) -> Self {
        Self::InvalidProject(e.to_string())
    }
}

impl From<CommandError> for AppError {
    fn from(e: CommandError) -> Self {
        Self::Command(e.to_string())
    }
}

impl From<GeometryError> for AppError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
