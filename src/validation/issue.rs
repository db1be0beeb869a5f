//! Validation issue types.
//!
//! A [`ValidationIssue`] serializes as
//! `{ code, severity, message, entityId, suggestedFix? }` so an issue list
//! can be shown verbatim by a UI or handed to an AI agent.

use serde::{Deserialize, Serialize};

use crate::ir::{IdKind, OpeningPatch};

/// Machine-readable issue code, serialized as e.g. `"WALL_TOO_SHORT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    DuplicateLevelId,
    DuplicateWallId,
    DuplicateOpeningId,
    EmptyLevel,
    WallTooShort,
    WallUnusuallyShort,
    WallNotFound,
    OpeningExceedsWall,
    DoorTooNarrow,
    DoorTooShort,
    DoorHasSill,
    WindowSillTooLow,
    OpeningsOverlap,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateLevelId => "DUPLICATE_LEVEL_ID",
            Self::DuplicateWallId => "DUPLICATE_WALL_ID",
            Self::DuplicateOpeningId => "DUPLICATE_OPENING_ID",
            Self::EmptyLevel => "EMPTY_LEVEL",
            Self::WallTooShort => "WALL_TOO_SHORT",
            Self::WallUnusuallyShort => "WALL_UNUSUALLY_SHORT",
            Self::WallNotFound => "WALL_NOT_FOUND",
            Self::OpeningExceedsWall => "OPENING_EXCEEDS_WALL",
            Self::DoorTooNarrow => "DOOR_TOO_NARROW",
            Self::DoorTooShort => "DOOR_TOO_SHORT",
            Self::DoorHasSill => "DOOR_HAS_SILL",
            Self::WindowSillTooLow => "WINDOW_SILL_TOO_LOW",
            Self::OpeningsOverlap => "OPENINGS_OVERLAP",
        }
    }

    /// Kind of entity an issue with this code is reported against.
    pub fn entity_kind(self) -> IdKind {
        match self {
            Self::DuplicateLevelId | Self::EmptyLevel => IdKind::Level,
            Self::DuplicateWallId | Self::WallTooShort | Self::WallUnusuallyShort => IdKind::Wall,
            Self::DuplicateOpeningId
            | Self::WallNotFound
            | Self::OpeningExceedsWall
            | Self::DoorTooNarrow
            | Self::DoorTooShort
            | Self::DoorHasSill
            | Self::WindowSillTooLow
            | Self::OpeningsOverlap => IdKind::Opening,
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors block save/export; warnings never block anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixAction {
    Delete,
}

/// Automatic remedy attached to an issue.
///
/// Serializes either as `{"action": "delete"}` or as a partial opening such
/// as `{"offsetMm": 1100}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestedFix {
    Action { action: FixAction },
    Opening(OpeningPatch),
}

impl SuggestedFix {
    pub const fn delete() -> Self {
        Self::Action {
            action: FixAction::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    /// Id of the offending entity.
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, entity_id: &str, message: String) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message,
            entity_id: entity_id.to_string(),
            suggested_fix: None,
        }
    }

    pub fn warning(code: IssueCode, entity_id: &str, message: String) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message,
            entity_id: entity_id.to_string(),
            suggested_fix: None,
        }
    }

    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

pub fn get_errors(issues: &[ValidationIssue]) -> Vec<&ValidationIssue> {
    issues.iter().filter(|i| i.is_error()).collect()
}

pub fn get_warnings(issues: &[ValidationIssue]) -> Vec<&ValidationIssue> {
    issues.iter().filter(|i| !i.is_error()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_serializes_with_camel_case_keys() {
        let issue = ValidationIssue::error(IssueCode::WallTooShort, "w1", "too short".to_string())
            .with_fix(SuggestedFix::delete());
        let value = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(value["code"], "WALL_TOO_SHORT");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["entityId"], "w1");
        assert_eq!(value["suggestedFix"], serde_json::json!({"action": "delete"}));
    }

    #[test]
    fn fix_free_issue_omits_suggested_fix() {
        let issue = ValidationIssue::warning(IssueCode::EmptyLevel, "l1", "empty".to_string());
        let value = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(value["severity"], "warning");
        assert!(value.get("suggestedFix").is_none());
    }

    #[test]
    fn opening_fix_serializes_as_partial_opening() {
        let fix = SuggestedFix::Opening(OpeningPatch::offset(1100));
        let value = serde_json::to_value(&fix).expect("serialize");
        assert_eq!(value, serde_json::json!({"offsetMm": 1100}));
    }

    #[test]
    fn code_display_matches_serialized_form() {
        let value = serde_json::to_value(IssueCode::OpeningsOverlap).expect("serialize");
        assert_eq!(value, IssueCode::OpeningsOverlap.to_string());
    }

    #[test]
    fn wall_not_found_is_reported_against_the_opening() {
        assert_eq!(IssueCode::WallNotFound.entity_kind(), IdKind::Opening);
        assert_eq!(IssueCode::WallTooShort.entity_kind(), IdKind::Wall);
        assert_eq!(IssueCode::EmptyLevel.entity_kind(), IdKind::Level);
    }

    #[test]
    fn error_warning_split() {
        let issues = vec![
            ValidationIssue::warning(IssueCode::EmptyLevel, "l1", String::new()),
            ValidationIssue::error(IssueCode::WallNotFound, "o1", String::new()),
        ];
        assert!(has_errors(&issues));
        assert_eq!(get_errors(&issues).len(), 1);
        assert_eq!(get_warnings(&issues)[0].code, IssueCode::EmptyLevel);
        assert!(!has_errors(&issues[..1]));
    }
}
