//! Editing session state.
//!
//! [`EditorState`] is the single owner of the open [`Project`] and its
//! [`CommandHistory`]. Every mutation goes through it, and the issue list is
//! refreshed after each one so a UI can display it without re-validating.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::history::{command_for_fix, Command, CommandError, CommandHistory};
use crate::ir::Project;
use crate::validation::{has_errors, validate_project, ValidationIssue};

/// The active canvas tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTool {
    #[default]
    Select,
    Wall,
    Door,
    Window,
    Pan,
}

/// The currently selected entity on the active level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Wall(String),
    Opening(String),
}

#[derive(Debug)]
pub struct EditorState {
    project: Project,
    history: CommandHistory,
    tool: EditorTool,
    selection: Option<Selection>,
    active_level: usize,
    issues: Vec<ValidationIssue>,
}

impl EditorState {
    pub fn new(project: Project, config: &EditorConfig) -> Self {
        let mut state = Self {
            project,
            history: CommandHistory::from_config(&config.history),
            tool: EditorTool::default(),
            selection: None,
            active_level: 0,
            issues: Vec::new(),
        };
        state.validate();
        state
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn active_level(&self) -> usize {
        self.active_level
    }

    /// Issues from the most recent validation pass.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn can_save(&self) -> bool {
        !has_errors(&self.issues)
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    pub fn execute(&mut self, command: Box<dyn Command>) -> Result<(), CommandError> {
        self.history.execute(&mut self.project, command)?;
        self.after_mutation();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let changed = self.history.undo(&mut self.project)?;
        if changed {
            self.after_mutation();
        }
        Ok(changed)
    }

    pub fn redo(&mut self) -> Result<bool, CommandError> {
        let changed = self.history.redo(&mut self.project)?;
        if changed {
            self.after_mutation();
        }
        Ok(changed)
    }

    /// Apply `issue`'s suggested fix on the active level as an undoable command.
    pub fn apply_fix(&mut self, issue: &ValidationIssue) -> Result<(), CommandError> {
        let command = command_for_fix(&self.project, self.active_level, issue)?;
        self.execute(command)
    }

    /// Swap in a freshly loaded project, discarding history and selection.
    pub fn replace_project(&mut self, project: Project) {
        info!(project = %project.id, "editor project replaced");
        self.project = project;
        self.history.clear();
        self.selection = None;
        self.active_level = 0;
        self.validate();
        if has_errors(&self.issues) {
            warn!(project = %self.project.id, "project has validation errors");
        }
    }

    /// Re-run validation and return the fresh issue list.
    pub fn validate(&mut self) -> &[ValidationIssue] {
        self.issues = validate_project(&self.project);
        &self.issues
    }

    // ── View state ────────────────────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: EditorTool) {
        self.tool = tool;
    }

    /// Select an entity on the active level. Returns `false` if it does not exist.
    pub fn select(&mut self, selection: Selection) -> bool {
        if self.selection_exists(&selection) {
            self.selection = Some(selection);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn set_active_level(&mut self, level_index: usize) -> Result<(), CommandError> {
        if self.project.level(level_index).is_none() {
            return Err(CommandError::LevelNotFound { level_index });
        }
        self.active_level = level_index;
        self.selection = None;
        Ok(())
    }

    fn selection_exists(&self, selection: &Selection) -> bool {
        let Some(level) = self.project.level(self.active_level) else {
            return false;
        };
        match selection {
            Selection::Wall(id) => level.find_wall(id).is_some(),
            Selection::Opening(id) => level.find_opening(id).is_some(),
        }
    }

    fn after_mutation(&mut self) {
        if self
            .selection
            .as_ref()
            .is_some_and(|s| !self.selection_exists(s))
        {
            self.selection = None;
        }
        self.validate();
    }
}
