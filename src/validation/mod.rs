//! Project validation engine.
//!
//! [`validate_project`] re-checks a whole project after every mutation and
//! returns the full issue list, so several problems can be fixed per pass.
//! The sub-validators are public for targeted checks and tests.

pub mod issue;
pub mod rules;

pub use issue::{
    get_errors, get_warnings, has_errors, FixAction, IssueCode, Severity, SuggestedFix,
    ValidationIssue,
};
pub use rules::{
    validate_level_has_walls, validate_opening_dimensions, validate_opening_fits_wall,
    validate_openings_no_overlap, validate_project, validate_unique_ids, validate_wall_length,
};
