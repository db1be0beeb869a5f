//! Structural and dimensional rules.
//!
//! Every function here is pure: it only reads its arguments and never fails.
//! Malformed data is reported as issues, not errors.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::issue::{IssueCode, SuggestedFix, ValidationIssue};
use crate::ir::{Level, Opening, OpeningPatch, OpeningType, Project, Wall};

/// Walls shorter than this are unusable.
pub const WALL_MIN_LENGTH_MM: f64 = 100.0;
/// Walls shorter than this are flagged as suspicious.
pub const WALL_WARN_LENGTH_MM: f64 = 500.0;
pub const DOOR_MIN_WIDTH_MM: i64 = 700;
pub const DOOR_MIN_HEIGHT_MM: i64 = 1800;
pub const WINDOW_MIN_SILL_MM: i64 = 600;

/// Run every rule over `project`.
///
/// Issue order is fixed: unique ids first, then per level the empty-level
/// check, wall lengths, opening fit and dimensions, and finally overlaps.
pub fn validate_project(project: &Project) -> Vec<ValidationIssue> {
    let mut issues = validate_unique_ids(project);

    for level in &project.levels {
        issues.extend(validate_level_has_walls(level));
        for wall in &level.walls {
            issues.extend(validate_wall_length(wall));
        }
        for opening in &level.openings {
            issues.extend(validate_opening_fits_wall(opening, &level.walls));
            issues.extend(validate_opening_dimensions(opening));
        }
        issues.extend(validate_openings_no_overlap(level));
    }

    tracing::debug!(
        project = %project.id,
        errors = issues.iter().filter(|i| i.is_error()).count(),
        warnings = issues.iter().filter(|i| !i.is_error()).count(),
        "validated project"
    );
    issues
}

pub fn validate_wall_length(wall: &Wall) -> Vec<ValidationIssue> {
    let length = wall.length();
    if length < WALL_MIN_LENGTH_MM {
        vec![ValidationIssue::error(
            IssueCode::WallTooShort,
            &wall.id,
            format!(
                "Wall {} is {length:.0}mm long; the minimum is {WALL_MIN_LENGTH_MM:.0}mm",
                wall.id
            ),
        )
        .with_fix(SuggestedFix::delete())]
    } else if length < WALL_WARN_LENGTH_MM {
        vec![ValidationIssue::warning(
            IssueCode::WallUnusuallyShort,
            &wall.id,
            format!(
                "Wall {} is unusually short ({length:.0}mm, below {WALL_WARN_LENGTH_MM:.0}mm)",
                wall.id
            ),
        )]
    } else {
        Vec::new()
    }
}

/// Check that `opening` references an existing wall and lies within it.
///
/// The end-overflow fix pushes the opening back so it ends at the wall end;
/// when the opening is wider than the wall the suggested offset is negative
/// and re-validating reports it again.
pub fn validate_opening_fits_wall(opening: &Opening, walls: &[Wall]) -> Vec<ValidationIssue> {
    let Some(wall) = walls.iter().find(|w| w.id == opening.wall_id) else {
        return vec![ValidationIssue::error(
            IssueCode::WallNotFound,
            &opening.id,
            format!(
                "Opening {} references missing wall {}",
                opening.id, opening.wall_id
            ),
        )
        .with_fix(SuggestedFix::delete())];
    };

    let length = wall.length();
    let mut issues = Vec::new();
    if opening.offset_mm < 0 {
        issues.push(
            ValidationIssue::error(
                IssueCode::OpeningExceedsWall,
                &opening.id,
                format!(
                    "Opening {} starts before the start of wall {} (offset {}mm)",
                    opening.id, wall.id, opening.offset_mm
                ),
            )
            .with_fix(SuggestedFix::Opening(OpeningPatch::offset(0))),
        );
    } else if opening.end_mm() as f64 > length {
        let fitted = (length.floor() as i64).saturating_sub(opening.width_mm);
        issues.push(
            ValidationIssue::error(
                IssueCode::OpeningExceedsWall,
                &opening.id,
                format!(
                    "Opening {} ends at {}mm but wall {} is only {length:.0}mm long",
                    opening.id,
                    opening.end_mm(),
                    wall.id
                ),
            )
            .with_fix(SuggestedFix::Opening(OpeningPatch::offset(fitted))),
        );
    }
    issues
}

pub fn validate_opening_dimensions(opening: &Opening) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let fix = |patch: OpeningPatch| SuggestedFix::Opening(patch);

    match opening.kind {
        OpeningType::Door => {
            if opening.width_mm < DOOR_MIN_WIDTH_MM {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::DoorTooNarrow,
                        &opening.id,
                        format!(
                            "Door {} is {}mm wide; doors must be at least {DOOR_MIN_WIDTH_MM}mm",
                            opening.id, opening.width_mm
                        ),
                    )
                    .with_fix(fix(OpeningPatch {
                        width_mm: Some(DOOR_MIN_WIDTH_MM),
                        ..OpeningPatch::default()
                    })),
                );
            }
            if opening.height_mm < DOOR_MIN_HEIGHT_MM {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::DoorTooShort,
                        &opening.id,
                        format!(
                            "Door {} is {}mm high; doors must be at least {DOOR_MIN_HEIGHT_MM}mm",
                            opening.id, opening.height_mm
                        ),
                    )
                    .with_fix(fix(OpeningPatch {
                        height_mm: Some(DOOR_MIN_HEIGHT_MM),
                        ..OpeningPatch::default()
                    })),
                );
            }
            if opening.sill_height_mm != 0 {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::DoorHasSill,
                        &opening.id,
                        format!(
                            "Door {} has a {}mm sill; doors must start at floor level",
                            opening.id, opening.sill_height_mm
                        ),
                    )
                    .with_fix(fix(OpeningPatch {
                        sill_height_mm: Some(0),
                        ..OpeningPatch::default()
                    })),
                );
            }
        }
        OpeningType::Window => {
            if opening.sill_height_mm < WINDOW_MIN_SILL_MM {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::WindowSillTooLow,
                        &opening.id,
                        format!(
                            "Window {} has a {}mm sill; windows need at least {WINDOW_MIN_SILL_MM}mm",
                            opening.id, opening.sill_height_mm
                        ),
                    )
                    .with_fix(fix(OpeningPatch {
                        sill_height_mm: Some(WINDOW_MIN_SILL_MM),
                        ..OpeningPatch::default()
                    })),
                );
            }
        }
    }
    issues
}

/// Ids must be unique within their category (levels, walls, openings)
/// across the whole project.
pub fn validate_unique_ids(project: &Project) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut level_ids = HashSet::new();
    let mut wall_ids = HashSet::new();
    let mut opening_ids = HashSet::new();

    for level in &project.levels {
        if !level_ids.insert(level.id.as_str()) {
            issues.push(ValidationIssue::error(
                IssueCode::DuplicateLevelId,
                &level.id,
                format!("Duplicate level id {}", level.id),
            ));
        }
        for wall in &level.walls {
            if !wall_ids.insert(wall.id.as_str()) {
                issues.push(ValidationIssue::error(
                    IssueCode::DuplicateWallId,
                    &wall.id,
                    format!("Duplicate wall id {}", wall.id),
                ));
            }
        }
        for opening in &level.openings {
            if !opening_ids.insert(opening.id.as_str()) {
                issues.push(ValidationIssue::error(
                    IssueCode::DuplicateOpeningId,
                    &opening.id,
                    format!("Duplicate opening id {}", opening.id),
                ));
            }
        }
    }
    issues
}

pub fn validate_level_has_walls(level: &Level) -> Vec<ValidationIssue> {
    if level.walls.is_empty() {
        vec![ValidationIssue::warning(
            IssueCode::EmptyLevel,
            &level.id,
            format!("Level {} has no walls", level.name),
        )]
    } else {
        Vec::new()
    }
}

/// Report openings on the same wall whose intervals overlap.
///
/// Openings are grouped by wall (in order of first appearance) and sorted by
/// offset; only neighbours in that order are compared. Touching intervals
/// (`end == next start`) are allowed. The issue is raised against the later
/// opening with a fix moving it to the end of its predecessor.
pub fn validate_openings_no_overlap(level: &Level) -> Vec<ValidationIssue> {
    let mut by_wall: IndexMap<&str, Vec<&Opening>> = IndexMap::new();
    for opening in &level.openings {
        by_wall
            .entry(opening.wall_id.as_str())
            .or_default()
            .push(opening);
    }

    let mut issues = Vec::new();
    for (wall_id, mut group) in by_wall {
        group.sort_by_key(|o| o.offset_mm);
        for pair in group.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let current_end = current.end_mm();
            if current_end > next.offset_mm {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::OpeningsOverlap,
                        &next.id,
                        format!(
                            "Openings {} and {} overlap on wall {wall_id}",
                            current.id, next.id
                        ),
                    )
                    .with_fix(SuggestedFix::Opening(OpeningPatch::offset(current_end))),
                );
            }
        }
    }
    issues
}
