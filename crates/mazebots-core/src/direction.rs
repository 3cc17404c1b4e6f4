//! Absolute and heading-relative directions on the maze grid.

use serde::{Deserialize, Serialize};

/// Absolute cardinal direction. The grid uses screen coordinates: `y` grows
/// downward, so [`Direction::Up`] steps toward smaller `y`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical enumeration order, also the seeding and tie-break order used
    /// by the directional search.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Dense index into per-direction tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Unit step offset in grid coordinates.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction 90 degrees to the left of this heading.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Direction 90 degrees to the right of this heading.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Opposite direction. Its own inverse.
    #[must_use]
    pub const fn behind(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Direction expressed relative to the agent's current heading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelativeDirection {
    Forward,
    Left,
    Right,
    Behind,
}

impl RelativeDirection {
    /// Fixed lane order shared by the feature vector and the policy output
    /// vector.
    pub const ALL: [Self; 4] = [Self::Forward, Self::Left, Self::Right, Self::Behind];

    /// Resolve this relative direction against an absolute heading.
    #[must_use]
    pub const fn resolve(self, heading: Direction) -> Direction {
        match self {
            Self::Forward => heading,
            Self::Left => heading.left(),
            Self::Right => heading.right(),
            Self::Behind => heading.behind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_left_is_behind() {
        for heading in Direction::ALL {
            assert_eq!(heading.left().left(), heading.behind());
        }
    }

    #[test]
    fn behind_is_its_own_inverse() {
        for heading in Direction::ALL {
            assert_eq!(heading.behind().behind(), heading);
        }
    }

    #[test]
    fn left_and_right_are_inverses() {
        for heading in Direction::ALL {
            assert_eq!(heading.left().right(), heading);
            assert_eq!(heading.right().left(), heading);
        }
    }

    #[test]
    fn relative_lanes_resolve_against_heading() {
        let heading = Direction::Right;
        assert_eq!(RelativeDirection::Forward.resolve(heading), Direction::Right);
        assert_eq!(RelativeDirection::Left.resolve(heading), Direction::Up);
        assert_eq!(RelativeDirection::Right.resolve(heading), Direction::Down);
        assert_eq!(RelativeDirection::Behind.resolve(heading), Direction::Left);
    }

    #[test]
    fn offsets_cancel_for_opposite_directions() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (bx, by) = direction.behind().offset();
            assert_eq!((dx + bx, dy + by), (0, 0));
        }
    }
}
