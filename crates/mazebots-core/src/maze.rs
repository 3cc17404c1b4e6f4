//! Read-only maze access and the grid fixture used by tests and the arena.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a tile in grid coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Classification of a single maze tile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Pellet,
    PowerPellet,
}

impl TileKind {
    /// Whether an agent may occupy this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Score awarded when an agent consumes this tile, if any.
    #[must_use]
    pub const fn score_value(self) -> Option<i64> {
        match self {
            Self::Pellet => Some(10),
            Self::PowerPellet => Some(50),
            Self::Empty | Self::Wall => None,
        }
    }
}

/// Read-only view of tile adjacency and classification.
///
/// The decision core never mutates the maze; anything implementing this trait
/// can back the directional search.
pub trait MazeView {
    /// Classification of the tile at `pos`, or `None` when `pos` is off-map.
    fn kind_at(&self, pos: TilePos) -> Option<TileKind>;

    /// The tile one step from `pos` in `direction`, or `None` when that step
    /// leaves the map.
    fn neighbor(&self, pos: TilePos, direction: Direction) -> Option<TilePos>;

    /// Like [`MazeView::neighbor`], but also `None` when the destination is a
    /// wall. This is the adjacency the search and the arena walk.
    fn walkable_neighbor(&self, pos: TilePos, direction: Direction) -> Option<TilePos> {
        let next = self.neighbor(pos, direction)?;
        match self.kind_at(next) {
            Some(kind) if kind.is_walkable() => Some(next),
            _ => None,
        }
    }
}

/// Errors raised while constructing a [`GridMaze`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze map must contain at least one row")]
    EmptyMap,
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown map glyph {glyph:?} at row {row}")]
    UnknownGlyph { glyph: char, row: usize },
}

/// Rectangular maze with toroidal wrapping, as in the classic arcade tunnels.
///
/// Primarily a test and training fixture; production hosts supply their own
/// [`MazeView`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridMaze {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl GridMaze {
    /// Parse a maze from ASCII art: `#` wall, `.` pellet, `o` power pellet,
    /// space empty. Rows must all have the same width.
    pub fn parse(map: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = map.lines().filter(|line| !line.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(MazeError::EmptyMap);
        };
        let width = first.chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for glyph in line.chars() {
                tiles.push(match glyph {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Pellet,
                    'o' => TileKind::PowerPellet,
                    ' ' => TileKind::Empty,
                    other => return Err(MazeError::UnknownGlyph { glyph: other, row }),
                });
            }
        }
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of pellet and power pellet tiles remaining.
    #[must_use]
    pub fn pellets_remaining(&self) -> usize {
        self.tiles
            .iter()
            .filter(|kind| matches!(kind, TileKind::Pellet | TileKind::PowerPellet))
            .count()
    }

    /// Overwrite the classification of an in-bounds tile. Returns the previous
    /// kind, or `None` when `pos` is out of bounds.
    pub fn set_kind(&mut self, pos: TilePos, kind: TileKind) -> Option<TileKind> {
        let index = self.index_of(pos)?;
        let previous = self.tiles[index];
        self.tiles[index] = kind;
        Some(previous)
    }

    fn index_of(&self, pos: TilePos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    fn wrap(&self, pos: TilePos) -> TilePos {
        TilePos::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }
}

impl MazeView for GridMaze {
    fn kind_at(&self, pos: TilePos) -> Option<TileKind> {
        self.index_of(pos).map(|index| self.tiles[index])
    }

    fn neighbor(&self, pos: TilePos, direction: Direction) -> Option<TilePos> {
        self.index_of(pos)?;
        let (dx, dy) = direction.offset();
        Some(self.wrap(TilePos::new(pos.x + dx, pos.y + dy)))
    }
}
