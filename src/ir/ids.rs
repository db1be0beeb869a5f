//! Entity id conventions.
//!
//! Every id is a one-letter prefix followed by decimal digits (`p1`, `l1`,
//! `w12`, `o3`). New ids are allocated as `<prefix><max + 1>` over the whole
//! project, which keeps them unique across levels.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Project;

static PROJECT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^p\d+$").expect("valid regex"));
static LEVEL_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^l\d+$").expect("valid regex"));
static WALL_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^w\d+$").expect("valid regex"));
static OPENING_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^o\d+$").expect("valid regex"));

/// The entity kinds that carry an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Project,
    Level,
    Wall,
    Opening,
}

impl IdKind {
    pub fn prefix(self) -> char {
        match self {
            Self::Project => 'p',
            Self::Level => 'l',
            Self::Wall => 'w',
            Self::Opening => 'o',
        }
    }

    /// Returns `true` when `id` follows this kind's `<prefix><digits>` pattern.
    pub fn matches(self, id: &str) -> bool {
        let re = match self {
            Self::Project => &PROJECT_ID,
            Self::Level => &LEVEL_ID,
            Self::Wall => &WALL_ID,
            Self::Opening => &OPENING_ID,
        };
        re.is_match(id)
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Level => "level",
            Self::Wall => "wall",
            Self::Opening => "opening",
        })
    }
}

/// Numeric part of `id` if it carries `prefix`.
fn numeric_suffix(id: &str, prefix: char) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

fn next_id<'a>(ids: impl Iterator<Item = &'a str>, kind: IdKind) -> String {
    let prefix = kind.prefix();
    let max = ids
        .filter_map(|id| numeric_suffix(id, prefix))
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", max + 1)
}

pub fn next_level_id(project: &Project) -> String {
    next_id(project.levels.iter().map(|l| l.id.as_str()), IdKind::Level)
}

pub fn next_wall_id(project: &Project) -> String {
    next_id(
        project
            .levels
            .iter()
            .flat_map(|l| l.walls.iter().map(|w| w.id.as_str())),
        IdKind::Wall,
    )
}

pub fn next_opening_id(project: &Project) -> String {
    next_id(
        project
            .levels
            .iter()
            .flat_map(|l| l.openings.iter().map(|o| o.id.as_str())),
        IdKind::Opening,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::schema::create_empty_project;
    use crate::ir::types::{Point, Wall};

    #[test]
    fn patterns_require_prefix_and_digits() {
        assert!(IdKind::Wall.matches("w1"));
        assert!(IdKind::Wall.matches("w0042"));
        assert!(!IdKind::Wall.matches("w"));
        assert!(!IdKind::Wall.matches("o1"));
        assert!(!IdKind::Wall.matches("w1a"));
        assert!(IdKind::Project.matches("p7"));
        assert!(IdKind::Level.matches("l1"));
        assert!(IdKind::Opening.matches("o10"));
    }

    #[test]
    fn next_wall_id_starts_at_one() {
        let project = create_empty_project("Empty");
        assert_eq!(next_wall_id(&project), "w1");
        assert_eq!(next_opening_id(&project), "o1");
        assert_eq!(next_level_id(&project), "l2");
    }

    #[test]
    fn next_wall_id_skips_past_highest_existing() {
        let mut project = create_empty_project("Gaps");
        for id in ["w3", "w10", "custom"] {
            project.levels[0].walls.push(Wall {
                id: id.to_string(),
                a: Point::new(0, 0),
                b: Point::new(1000, 0),
                thickness_mm: 200,
                height_mm: 2700,
            });
        }
        assert_eq!(next_wall_id(&project), "w11");
    }
}
