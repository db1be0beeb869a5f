//! Command-based undo/redo.
//!
//! Every mutation of a [`Project`](crate::ir::Project) goes through a
//! [`Command`] recorded by a [`CommandHistory`]. Commands address entities by
//! level index and id, so they stay valid while the project changes around
//! them.

pub mod command;
pub mod commands;
pub mod entity;
pub mod fix;
pub mod stack;

pub use command::{Command, CommandError, CommandMeta};
pub use commands::{
    AddCommand, AddOpeningCommand, AddWallCommand, MoveOpeningCommand, RemoveCommand,
    RemoveOpeningCommand, RemoveWallCommand, UpdateCommand, UpdateOpeningCommand,
    UpdateWallCommand,
};
pub use entity::LevelEntity;
pub use fix::command_for_fix;
pub use stack::{CommandHistory, HistoryState, DEFAULT_MAX_HISTORY};
