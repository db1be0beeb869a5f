//! The reversible command contract.

use chrono::{DateTime, Utc};

use crate::ir::{IdKind, Level, Project};
use crate::validation::IssueCode;

/// Errors raised while constructing or running a command.
///
/// Construction errors are precondition violations (a stale id from the UI);
/// they happen before the command reaches the history, so history state is
/// never touched by them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("level index {level_index} does not exist")]
    LevelNotFound { level_index: usize },

    #[error("{kind} {id} not found")]
    EntityNotFound { kind: IdKind, id: String },

    #[error("issue {code} has no applicable fix")]
    FixNotApplicable { code: IssueCode },
}

/// A reversible, self-contained mutation of a [`Project`].
///
/// Commands capture at construction time whatever prior state they need to
/// reverse themselves, and mutate the project in place.
pub trait Command: std::fmt::Debug {
    fn execute(&mut self, project: &mut Project) -> Result<(), CommandError>;

    fn undo(&mut self, project: &mut Project) -> Result<(), CommandError>;

    fn redo(&mut self, project: &mut Project) -> Result<(), CommandError> {
        self.execute(project)
    }

    /// Human-readable label, e.g. for an "Undo Remove wall w3" menu entry.
    fn description(&self) -> &str;

    fn timestamp(&self) -> DateTime<Utc>;
}

/// Description and creation time shared by every concrete command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMeta {
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl CommandMeta {
    pub fn new(description: String) -> Self {
        Self {
            description,
            timestamp: Utc::now(),
        }
    }
}

pub(crate) fn level(project: &Project, level_index: usize) -> Result<&Level, CommandError> {
    project
        .level(level_index)
        .ok_or(CommandError::LevelNotFound { level_index })
}

pub(crate) fn level_mut(
    project: &mut Project,
    level_index: usize,
) -> Result<&mut Level, CommandError> {
    project
        .level_mut(level_index)
        .ok_or(CommandError::LevelNotFound { level_index })
}
