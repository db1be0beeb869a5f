//! Bounded linear undo/redo history.

use tracing::{debug, warn};

use super::command::{Command, CommandError};
use crate::config::HistoryConfig;
use crate::ir::Project;

pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Where the cursor sits relative to the recorded commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Nothing to undo.
    Empty,
    /// Both undo and redo are available.
    MidStack,
    /// The last recorded command is applied; nothing to redo.
    AtHead,
}

/// Linear command history with a cursor at the last applied command.
///
/// The history does not own the project; every operation borrows it
/// mutably, so one editing session serializes access simply by owning both.
#[derive(Debug)]
pub struct CommandHistory {
    commands: Vec<Box<dyn Command>>,
    /// Index of the last applied command, `None` when nothing is applied.
    cursor: Option<usize>,
    max_size: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY)
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history keeping at most `max_size` commands (clamped to at least one).
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: None,
            max_size: max_size.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::with_max_size(config.max_size)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Run `command` and record it.
    ///
    /// Any undone commands after the cursor are discarded. If the command
    /// fails, the project is whatever the command left and the history is
    /// unchanged.
    pub fn execute(
        &mut self,
        project: &mut Project,
        mut command: Box<dyn Command>,
    ) -> Result<(), CommandError> {
        command.execute(project)?;
        debug!(command = command.description(), "executed");

        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.commands.len() {
            debug!(discarded = self.commands.len() - keep, "redo branch discarded");
            self.commands.truncate(keep);
        }
        self.commands.push(command);

        if self.commands.len() > self.max_size {
            let evicted = self.commands.remove(0);
            warn!(
                command = evicted.description(),
                max_size = self.max_size,
                "history full, oldest command evicted"
            );
        }
        self.cursor = Some(self.commands.len() - 1);
        Ok(())
    }

    /// Undo the command at the cursor. Returns `Ok(false)` when there is
    /// nothing to undo.
    pub fn undo(&mut self, project: &mut Project) -> Result<bool, CommandError> {
        let Some(cursor) = self.cursor else {
            return Ok(false);
        };
        let command = &mut self.commands[cursor];
        command.undo(project)?;
        debug!(command = command.description(), "undone");
        self.cursor = cursor.checked_sub(1);
        Ok(true)
    }

    /// Redo the command after the cursor. Returns `Ok(false)` when there is
    /// nothing to redo.
    pub fn redo(&mut self, project: &mut Project) -> Result<bool, CommandError> {
        let next = self.cursor.map_or(0, |c| c + 1);
        let Some(command) = self.commands.get_mut(next) else {
            return Ok(false);
        };
        command.redo(project)?;
        debug!(command = command.description(), "redone");
        self.cursor = Some(next);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.commands.len()
    }

    pub fn state(&self) -> HistoryState {
        match self.cursor {
            None => HistoryState::Empty,
            Some(c) if c + 1 < self.commands.len() => HistoryState::MidStack,
            Some(_) => HistoryState::AtHead,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = None;
    }

    /// Description of the command [`undo`](Self::undo) would reverse.
    pub fn undo_description(&self) -> Option<&str> {
        self.cursor.map(|c| self.commands[c].description())
    }

    /// Description of the command [`redo`](Self::redo) would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.commands
            .get(self.cursor.map_or(0, |c| c + 1))
            .map(|c| c.description())
    }
}
