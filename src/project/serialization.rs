//! Atomic save and validated load for `.json` project files.
//!
//! # Save
//! 1. Refresh `updatedAt` (and `createdAt` when missing).
//! 2. Write pretty-printed JSON to `<target>.tmp` (same directory, so same
//!    filesystem as the final path).
//! 3. Atomically rename the temp file over the target.
//! On any failure the temp file is deleted and the original is left intact.
//!
//! # Load
//! The file is parsed through the schema layer, so every field violation is
//! reported at once. Validation issues do not block loading; they are logged
//! and left for the editor to surface.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;
use crate::ir::schema::now_timestamp;
use crate::ir::{parse_project_str, Project};
use crate::validation::{get_errors, validate_project};

/// Pretty-printed JSON for `project`, in the same shape [`load`] accepts.
pub fn to_json_string(project: &Project) -> Result<String, AppError> {
    serde_json::to_string_pretty(project)
        .map_err(|e| AppError::ProjectSave(format!("cannot serialize project: {e}")))
}

/// Stamp `project` and save it to `path` using an atomic write.
pub fn save(project: &mut Project, path: &Path) -> Result<(), AppError> {
    let now = now_timestamp();
    if project.created_at.is_none() {
        project.created_at = Some(now.clone());
    }
    project.updated_at = Some(now);

    let json = to_json_string(project)?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Err(e) = write_file(&json, &tmp_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AppError::ProjectSave(format!("rename to final path failed: {e}"))
    })?;

    info!(project = %project.id, path = %path.display(), "project saved");
    Ok(())
}

/// Load and schema-check the project at `path`.
///
/// Returns [`AppError::FileNotFound`] for a missing file,
/// [`AppError::ProjectLoad`] if it cannot be read, and
/// [`AppError::InvalidProject`] if its content fails the schema.
pub fn load(path: &Path) -> Result<Project, AppError> {
    if !path.exists() {
        return Err(AppError::FileNotFound);
    }
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::ProjectLoad(format!("cannot read file: {e}")))?;
    let project = parse_project_str(&json)?;

    let issues = validate_project(&project);
    let errors = get_errors(&issues).len();
    if errors > 0 {
        warn!(project = %project.id, errors, "loaded project has validation errors");
    }
    info!(project = %project.id, path = %path.display(), "project loaded");
    Ok(project)
}

fn write_file(json: &str, path: &Path) -> Result<(), AppError> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::ProjectSave(format!("cannot create temp file: {e}")))?;
    file.write_all(json.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| AppError::ProjectSave(format!("cannot write temp file: {e}")))
}
