//! Turning a validation issue's suggested fix into an undoable command.

use super::command::{Command, CommandError};
use super::commands::{RemoveOpeningCommand, RemoveWallCommand, UpdateOpeningCommand};
use crate::ir::{IdKind, Project};
use crate::validation::{FixAction, SuggestedFix, ValidationIssue};

/// Build the command that applies `issue`'s suggested fix on `level_index`.
///
/// A `delete` fix removes the offending wall or opening; a partial-opening fix
/// updates the opening. Issues with no fix, or whose entity kind cannot be
/// deleted by a command (levels), yield [`CommandError::FixNotApplicable`].
pub fn command_for_fix(
    project: &Project,
    level_index: usize,
    issue: &ValidationIssue,
) -> Result<Box<dyn Command>, CommandError> {
    let not_applicable = || CommandError::FixNotApplicable { code: issue.code };
    let id = issue.entity_id.as_str();

    match issue.suggested_fix.as_ref().ok_or_else(not_applicable)? {
        SuggestedFix::Action {
            action: FixAction::Delete,
        } => match issue.code.entity_kind() {
            IdKind::Wall => Ok(Box::new(RemoveWallCommand::new(project, level_index, id)?)),
            IdKind::Opening => Ok(Box::new(RemoveOpeningCommand::new(
                project,
                level_index,
                id,
            )?)),
            IdKind::Level | IdKind::Project => Err(not_applicable()),
        },
        SuggestedFix::Opening(patch) => Ok(Box::new(UpdateOpeningCommand::new(
            project,
            level_index,
            id,
            patch.clone(),
        )?)),
    }
}
