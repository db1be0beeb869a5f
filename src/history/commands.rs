//! Concrete wall and opening commands.
//!
//! Commands address entities by level index and id, never by reference, so
//! they can sit in the history while the project keeps changing.
//!
//! Removing a wall does not remove its openings. The openings are left with a
//! dangling `wall_id`, which the next validation pass reports, and undoing
//! the removal restores exactly the wall.

use chrono::{DateTime, Utc};

use super::command::{level, level_mut, Command, CommandError, CommandMeta};
use super::entity::LevelEntity;
use crate::ir::{EntityPatch, Opening, OpeningPatch, Project, Wall, WallPatch};

pub type AddWallCommand = AddCommand<Wall>;
pub type AddOpeningCommand = AddCommand<Opening>;
pub type RemoveWallCommand = RemoveCommand<Wall>;
pub type RemoveOpeningCommand = RemoveCommand<Opening>;
pub type UpdateWallCommand = UpdateCommand<WallPatch>;
pub type UpdateOpeningCommand = UpdateCommand<OpeningPatch>;

fn not_found<E: LevelEntity>(id: &str) -> CommandError {
    CommandError::EntityNotFound {
        kind: E::KIND,
        id: id.to_string(),
    }
}

// ── Add ───────────────────────────────────────────────────────────────────────

/// Appends an entity to its level; undo removes that one entity again.
#[derive(Debug)]
pub struct AddCommand<E: LevelEntity> {
    entity: E,
    level_index: usize,
    meta: CommandMeta,
}

impl<E: LevelEntity> AddCommand<E> {
    pub fn new(entity: E, level_index: usize) -> Self {
        let meta = CommandMeta::new(format!("Add {} {}", E::KIND, entity.id()));
        Self {
            entity,
            level_index,
            meta,
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }
}

impl<E: LevelEntity> Command for AddCommand<E> {
    fn execute(&mut self, project: &mut Project) -> Result<(), CommandError> {
        let level = level_mut(project, self.level_index)?;
        E::collection_mut(level).push(self.entity.clone());
        Ok(())
    }

    /// Removes the last entity carrying the id, which is the one `execute`
    /// appended even when the id is duplicated on the level.
    fn undo(&mut self, project: &mut Project) -> Result<(), CommandError> {
        let items = E::collection_mut(level_mut(project, self.level_index)?);
        let id = self.entity.id();
        let at = items
            .iter()
            .rposition(|e| e.id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        items.remove(at);
        Ok(())
    }

    fn description(&self) -> &str {
        &self.meta.description
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.meta.timestamp
    }
}

// ── Remove ────────────────────────────────────────────────────────────────────

/// Removes an entity by id; undo re-inserts it at its original index.
///
/// Re-insertion is best effort: if other commands changed the collection in
/// between, the entity lands at the same index (or at the end when the
/// collection has shrunk below it), which may not be its original neighbour.
#[derive(Debug)]
pub struct RemoveCommand<E: LevelEntity> {
    entity: E,
    index: usize,
    level_index: usize,
    meta: CommandMeta,
}

impl<E: LevelEntity> RemoveCommand<E> {
    /// Capture the entity and its position. Fails if `id` is not on the level.
    pub fn new(project: &Project, level_index: usize, id: &str) -> Result<Self, CommandError> {
        let items = E::collection(level(project, level_index)?);
        let index = items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        Ok(Self {
            entity: items[index].clone(),
            index,
            level_index,
            meta: CommandMeta::new(format!("Remove {} {id}", E::KIND)),
        })
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }
}

impl<E: LevelEntity> Command for RemoveCommand<E> {
    /// Removes exactly one entity: the one at the captured index if it still
    /// carries the id, otherwise the first match.
    fn execute(&mut self, project: &mut Project) -> Result<(), CommandError> {
        let items = E::collection_mut(level_mut(project, self.level_index)?);
        let id = self.entity.id();
        let at = if items.get(self.index).is_some_and(|e| e.id() == id) {
            self.index
        } else {
            items
                .iter()
                .position(|e| e.id() == id)
                .ok_or_else(|| not_found::<E>(id))?
        };
        self.entity = items.remove(at);
        self.index = at;
        Ok(())
    }

    fn undo(&mut self, project: &mut Project) -> Result<(), CommandError> {
        let items = E::collection_mut(level_mut(project, self.level_index)?);
        let at = self.index.min(items.len());
        items.insert(at, self.entity.clone());
        Ok(())
    }

    fn description(&self) -> &str {
        &self.meta.description
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.meta.timestamp
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Applies a partial change-set; undo restores only the touched fields.
#[derive(Debug)]
pub struct UpdateCommand<P>
where
    P: EntityPatch,
    P::Target: LevelEntity,
{
    id: String,
    changes: P,
    previous: P,
    level_index: usize,
    meta: CommandMeta,
}

impl<P> UpdateCommand<P>
where
    P: EntityPatch,
    P::Target: LevelEntity,
{
    /// Snapshot the fields named by `changes`. Fails if `id` is not on the level.
    pub fn new(
        project: &Project,
        level_index: usize,
        id: &str,
        changes: P,
    ) -> Result<Self, CommandError> {
        let entity = <P::Target as LevelEntity>::find(level(project, level_index)?, id)
            .ok_or_else(|| not_found::<P::Target>(id))?;
        Ok(Self {
            id: id.to_string(),
            previous: changes.capture(entity),
            changes,
            level_index,
            meta: CommandMeta::new(format!("Update {} {id}", <P::Target as LevelEntity>::KIND)),
        })
    }

    pub fn changes(&self) -> &P {
        &self.changes
    }

    pub fn previous(&self) -> &P {
        &self.previous
    }

    fn apply(&self, project: &mut Project, patch: &P) -> Result<(), CommandError> {
        let level = level_mut(project, self.level_index)?;
        let entity = <P::Target as LevelEntity>::find_mut(level, &self.id)
            .ok_or_else(|| not_found::<P::Target>(&self.id))?;
        patch.apply(entity);
        Ok(())
    }
}

impl<P> Command for UpdateCommand<P>
where
    P: EntityPatch,
    P::Target: LevelEntity,
{
    fn execute(&mut self, project: &mut Project) -> Result<(), CommandError> {
        self.apply(project, &self.changes)
    }

    fn undo(&mut self, project: &mut Project) -> Result<(), CommandError> {
        self.apply(project, &self.previous)
    }

    fn description(&self) -> &str {
        &self.meta.description
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.meta.timestamp
    }
}

// ── Move ──────────────────────────────────────────────────────────────────────

/// Slides an opening along its wall by changing only `offset_mm`.
#[derive(Debug)]
pub struct MoveOpeningCommand {
    opening_id: String,
    old_offset: i64,
    new_offset: i64,
    level_index: usize,
    meta: CommandMeta,
}

impl MoveOpeningCommand {
    pub fn new(
        project: &Project,
        level_index: usize,
        opening_id: &str,
        new_offset: i64,
    ) -> Result<Self, CommandError> {
        let opening = Opening::find(level(project, level_index)?, opening_id)
            .ok_or_else(|| not_found::<Opening>(opening_id))?;
        Ok(Self {
            opening_id: opening_id.to_string(),
            old_offset: opening.offset_mm,
            new_offset,
            level_index,
            meta: CommandMeta::new(format!("Move opening {opening_id}")),
        })
    }

    pub fn old_offset(&self) -> i64 {
        self.old_offset
    }

    pub fn new_offset(&self) -> i64 {
        self.new_offset
    }

    fn set_offset(&self, project: &mut Project, offset: i64) -> Result<(), CommandError> {
        let level = level_mut(project, self.level_index)?;
        let opening = Opening::find_mut(level, &self.opening_id)
            .ok_or_else(|| not_found::<Opening>(&self.opening_id))?;
        opening.offset_mm = offset;
        Ok(())
    }
}

impl Command for MoveOpeningCommand {
    fn execute(&mut self, project: &mut Project) -> Result<(), CommandError> {
        self.set_offset(project, self.new_offset)
    }

    fn undo(&mut self, project: &mut Project) -> Result<(), CommandError> {
        self.set_offset(project, self.old_offset)
    }

    fn description(&self) -> &str {
        &self.meta.description
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.meta.timestamp
    }
}
