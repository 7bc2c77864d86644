//! Grid geometry: positions on the unbounded lattice and the directions
//! between them.
//!
//! Rows grow southward and columns grow eastward. Every agent uses its own
//! start cell as the origin, so positions are only comparable between the
//! two agents once the host guarantees a shared origin.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell on the integer lattice, relative to the agent's start
///
/// Ordering is lexicographic on `(row, col)`; the search uses it as its
/// deterministic tie-break.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0, 0);

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position one cardinal step away
    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Position seen through the given compass slot of the 3×3 view
    pub const fn offset(self, compass: Compass) -> Self {
        let (dr, dc) = compass.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Manhattan (taxicab) distance, saturating at `u32::MAX` for cells at
    /// opposite ends of the lattice
    pub const fn manhattan(self, other: Position) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// The four cardinal neighbours, in [`Direction::ALL`] order
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Position)> {
        Direction::ALL.into_iter().map(move |d| (d, self.step(d)))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal movement direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(row, col)` change for one step
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Host action code
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub const fn from_code(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// Direction of a single cardinal step from `from` to `to`, if they are
    /// cardinal neighbours
    pub fn between(from: Position, to: Position) -> Option<Self> {
        match (to.row - from.row, to.col - from.col) {
            (-1, 0) => Some(Direction::North),
            (0, 1) => Some(Direction::East),
            (1, 0) => Some(Direction::South),
            (0, -1) => Some(Direction::West),
            _ => None,
        }
    }
}

/// One slot of the 3×3 view: the agent's own cell or one of 8 neighbours
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Compass {
    Here,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub const ALL: [Compass; 9] = [
        Compass::Here,
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    /// Slot index into a 9-element view array
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Compass::Here => (0, 0),
            Compass::North => (-1, 0),
            Compass::NorthEast => (-1, 1),
            Compass::East => (0, 1),
            Compass::SouthEast => (1, 1),
            Compass::South => (1, 0),
            Compass::SouthWest => (1, -1),
            Compass::West => (0, -1),
            Compass::NorthWest => (-1, -1),
        }
    }

    /// Percept key used by hosts speaking the character protocol
    pub const fn key(self) -> &'static str {
        match self {
            Compass::Here => "X",
            Compass::North => "N",
            Compass::NorthEast => "NE",
            Compass::East => "E",
            Compass::SouthEast => "SE",
            Compass::South => "S",
            Compass::SouthWest => "SW",
            Compass::West => "W",
            Compass::NorthWest => "NW",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl From<Direction> for Compass {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => Compass::North,
            Direction::East => Compass::East,
            Direction::South => Compass::South,
            Direction::West => Compass::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_between_agree() {
        let p = Position::new(3, -2);
        for dir in Direction::ALL {
            assert_eq!(Direction::between(p, p.step(dir)), Some(dir));
            assert_eq!(p.step(dir).step(dir.opposite()), p);
        }
        assert_eq!(Direction::between(p, p), None);
        assert_eq!(Direction::between(p, Position::new(4, -1)), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::ORIGIN.manhattan(Position::new(4, 4)), 8);
        assert_eq!(Position::new(-3, 2).manhattan(Position::new(1, -1)), 7);

        let far = Position::new(i32::MIN, i32::MIN);
        assert_eq!(Position::new(1, 1).manhattan(far), u32::MAX);
        assert_eq!(Position::new(i32::MAX, 0).manhattan(far), u32::MAX);
    }

    #[test]
    fn test_compass_keys_roundtrip() {
        for c in Compass::ALL {
            assert_eq!(Compass::from_key(c.key()), Some(c));
        }
        assert_eq!(Compass::from_key("Q"), None);
    }

    #[test]
    fn test_cardinal_compass_matches_step() {
        let p = Position::new(1, 1);
        for dir in Direction::ALL {
            assert_eq!(p.offset(Compass::from(dir)), p.step(dir));
        }
    }

    #[test]
    fn test_position_ordering_is_row_major() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }
}
