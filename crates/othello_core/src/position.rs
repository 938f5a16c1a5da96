//! Grid coordinates and step directions.

use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A (row, col) pair on the board grid.
///
/// Arithmetic is component-wise and unchecked; bounds are the board's
/// business (anything off the playable region reads as `Outer`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Row, 1..=8 on the playable region.
    pub row: i32,
    /// Column, 1..=8 on the playable region.
    pub col: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.row + other.row, self.col + other.col)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, other: Position) {
        *self = *self + other;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.row - other.row, self.col - other.col)
    }
}

impl SubAssign for Position {
    fn sub_assign(&mut self, other: Position) {
        *self = *self - other;
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// One of the eight compass directions a run of discs can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// Towards row 1.
    Up,
    /// Up and towards column 8.
    UpRight,
    /// Towards column 8.
    Right,
    /// Down and towards column 8.
    DownRight,
    /// Towards row 8.
    Down,
    /// Down and towards column 1.
    DownLeft,
    /// Towards column 1.
    Left,
    /// Up and towards column 1.
    UpLeft,
}

impl Direction {
    /// The unit step for this direction.
    pub const fn offset(self) -> Position {
        match self {
            Direction::Up => Position::new(-1, 0),
            Direction::UpRight => Position::new(-1, 1),
            Direction::Right => Position::new(0, 1),
            Direction::DownRight => Position::new(1, 1),
            Direction::Down => Position::new(1, 0),
            Direction::DownLeft => Position::new(1, -1),
            Direction::Left => Position::new(0, -1),
            Direction::UpLeft => Position::new(-1, -1),
        }
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, direction: Direction) -> Position {
        self + direction.offset()
    }
}

impl AddAssign<Direction> for Position {
    fn add_assign(&mut self, direction: Direction) {
        *self = *self + direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opposite_directions_cancel() {
        let origin = Position::new(4, 4);
        let sum = Direction::iter().fold(origin, |pos, dir| pos + dir);
        assert_eq!(sum, origin);
    }

    #[test]
    fn test_sub_undoes_add() {
        let a = Position::new(2, 7);
        let b = Direction::DownLeft.offset();
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_display_is_row_then_col() {
        assert_eq!(Position::new(3, 6).to_string(), "3 6");
    }
}
