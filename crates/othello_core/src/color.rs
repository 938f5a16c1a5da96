//! Cell colors.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::BoardError;

/// State of a single board cell.
///
/// `Outer` marks the border around the playable 8x8 region. It is never a
/// move target and never the result of [`Color::opposite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Unoccupied playable cell.
    Empty,
    /// Black disc (moves first).
    Black,
    /// White disc.
    White,
    /// Outside the playable region.
    Outer,
}

impl Color {
    /// The two colors that can own discs, black first.
    pub const fn playable() -> [Color; 2] {
        [Color::Black, Color::White]
    }

    /// Returns `true` for black and white.
    pub fn is_playable(self) -> bool {
        matches!(self, Color::Black | Color::White)
    }

    /// Returns the opponent color.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidOperation`] for `Empty` and `Outer`,
    /// which have no opponent.
    pub fn opposite(self) -> Result<Color, BoardError> {
        match self {
            Color::Black => Ok(Color::White),
            Color::White => Ok(Color::Black),
            Color::Empty | Color::Outer => Err(BoardError::InvalidOperation(format!(
                "only {} and {} have opponents, got {:?}",
                Color::Black,
                Color::White,
                self
            ))),
        }
    }

    /// Single-character symbol used for rendering and board snapshots.
    pub fn symbol(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Black => '@',
            Color::White => 'o',
            Color::Outer => '?',
        }
    }

    /// Parses a symbol produced by [`Color::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            '.' => Some(Color::Empty),
            '@' => Some(Color::Black),
            'o' => Some(Color::White),
            '?' => Some(Color::Outer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
