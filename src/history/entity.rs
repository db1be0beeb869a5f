//! Uniform access to the entity collections a level owns.

use crate::ir::{IdKind, Level, Opening, Wall};

/// An entity stored in one of a [`Level`]'s vectors and addressed by id.
pub trait LevelEntity: Clone + std::fmt::Debug {
    const KIND: IdKind;

    fn id(&self) -> &str;

    fn collection(level: &Level) -> &Vec<Self>;

    fn collection_mut(level: &mut Level) -> &mut Vec<Self>;

    fn find<'a>(level: &'a Level, id: &str) -> Option<&'a Self> {
        Self::collection(level).iter().find(|e| e.id() == id)
    }

    fn find_mut<'a>(level: &'a mut Level, id: &str) -> Option<&'a mut Self> {
        Self::collection_mut(level).iter_mut().find(|e| e.id() == id)
    }
}

impl LevelEntity for Wall {
    const KIND: IdKind = IdKind::Wall;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(level: &Level) -> &Vec<Self> {
        &level.walls
    }

    fn collection_mut(level: &mut Level) -> &mut Vec<Self> {
        &mut level.walls
    }
}

impl LevelEntity for Opening {
    const KIND: IdKind = IdKind::Opening;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(level: &Level) -> &Vec<Self> {
        &level.openings
    }

    fn collection_mut(level: &mut Level) -> &mut Vec<Self> {
        &mut level.openings
    }
}
