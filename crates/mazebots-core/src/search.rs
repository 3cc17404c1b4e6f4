//! Multi-directional nearest-target search over the maze graph.
//!
//! A single breadth-first flood from the origin carries a direction label on
//! every frontier entry: the absolute direction of the *first* step that
//! reached it. All four labels expand in unison through one shared visited
//! set, so each reachable tile is claimed by whichever initial direction gets
//! there first and recorded distances are true shortest-path step counts from
//! the origin, not artifacts of search order.

use crate::direction::Direction;
use crate::maze::{MazeView, TileKind, TilePos};
use std::collections::{HashSet, VecDeque};

/// Nearest predicate match reachable by first stepping in a given direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// Position of the matching tile.
    pub pos: TilePos,
    /// Step distance from the origin (always at least 1).
    pub distance: u32,
}

/// Per-direction search results for the four directions leaving the origin.
///
/// An entry is absent when the initial step in that direction is blocked or no
/// matching tile is reachable through it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionScan {
    hits: [Option<SearchHit>; 4],
}

impl DirectionScan {
    /// Result for the search that first stepped in `direction`.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<SearchHit> {
        self.hits[direction.index()]
    }

    /// Largest recorded distance across all directions this tick.
    #[must_use]
    pub fn max_distance(&self) -> Option<u32> {
        self.hits
            .iter()
            .flatten()
            .map(|hit| hit.distance)
            .max()
    }

    /// Whether no direction found a match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.iter().all(Option::is_none)
    }

    /// Recorded results paired with their initial direction.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, SearchHit)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.get(direction).map(|hit| (direction, hit)))
    }

    fn set(&mut self, direction: Direction, hit: SearchHit) {
        self.hits[direction.index()] = Some(hit);
    }
}

/// Controls whether a labelled frontier keeps expanding.
enum FloodControl {
    Continue,
    HaltLabel,
}

/// Label-propagating breadth-first flood from `origin`.
///
/// Invokes `visit` exactly once per claimed tile, in nondecreasing distance
/// order. The origin itself is never visited. Returning
/// [`FloodControl::HaltLabel`] stops expansion for that label only.
fn flood<M>(
    maze: &M,
    origin: TilePos,
    mut visit: impl FnMut(Direction, TilePos, TileKind, u32) -> FloodControl,
) where
    M: MazeView + ?Sized,
{
    let mut visited: HashSet<TilePos> = HashSet::new();
    visited.insert(origin);
    let mut queue: VecDeque<(TilePos, Direction, u32)> = VecDeque::new();

    // Seed one labelled frontier entry per unblocked initial step, in
    // canonical direction order. Ties for a tile reachable through two
    // initial steps go to the earlier direction.
    for direction in Direction::ALL {
        if let Some(next) = maze.walkable_neighbor(origin, direction) {
            if visited.insert(next) {
                queue.push_back((next, direction, 1));
            }
        }
    }

    let mut halted = [false; 4];
    while let Some((pos, label, distance)) = queue.pop_front() {
        if halted[label.index()] {
            continue;
        }
        let Some(kind) = maze.kind_at(pos) else {
            continue;
        };
        if let FloodControl::HaltLabel = visit(label, pos, kind, distance) {
            halted[label.index()] = true;
            continue;
        }
        for direction in Direction::ALL {
            if let Some(next) = maze.walkable_neighbor(pos, direction) {
                if visited.insert(next) {
                    queue.push_back((next, label, distance + 1));
                }
            }
        }
    }
}

/// For each of the four directions leaving `origin`, find the closest
/// reachable tile matching `predicate` and its step distance.
///
/// The origin is never treated as a match, even when it satisfies the
/// predicate. Worst case visits every reachable tile once.
pub fn nearest_in_all_directions<M, P>(maze: &M, origin: TilePos, predicate: P) -> DirectionScan
where
    M: MazeView + ?Sized,
    P: Fn(TilePos, TileKind) -> bool,
{
    let mut scan = DirectionScan::default();
    flood(maze, origin, |label, pos, kind, distance| {
        if predicate(pos, kind) {
            scan.set(label, SearchHit { pos, distance });
            FloodControl::HaltLabel
        } else {
            FloodControl::Continue
        }
    });
    scan
}
