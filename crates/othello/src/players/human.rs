//! Interactive player driven through the front-end view.

use anyhow::{Result, bail};
use othello_core::{Board, Color, Position};
use tracing::{debug, instrument};

use super::Player;
use crate::View;

/// Asks the user for each move.
///
/// Must be resolved with the contextual call style; without a view there is
/// nobody to ask.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    color: Color,
}

impl HumanPlayer {
    /// Creates a human player.
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Parses `"row col"` (or `"row,col"`) into a position.
pub(crate) fn parse_move(text: &str) -> Option<Position> {
    let mut parts = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}

impl Player for HumanPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn play(&mut self, _board: Board) -> Result<Position> {
        bail!("Human player needs a view to ask for moves")
    }

    #[instrument(skip(self, board, view), fields(color = ?self.color))]
    fn play_with_view(&mut self, board: Board, view: &mut dyn View) -> Result<Position> {
        let moves = board.valid_moves(self.color);
        let listing = moves
            .iter()
            .map(|p| format!("({})", p))
            .collect::<Vec<_>>()
            .join(" ");
        view.print(&format!("Valid moves: {}", listing));

        loop {
            let answer = view.input("Enter row and column")?;
            let Some(mv) = parse_move(&answer) else {
                view.alert("Expected two numbers, e.g. \"3 4\"");
                continue;
            };
            if !moves.contains(&mv) {
                view.alert(&format!("{} is not a valid move", mv));
                continue;
            }
            debug!(position = %mv, "Human choice");
            return Ok(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_accepts_spaces_and_commas() {
        assert_eq!(parse_move("3 4"), Some(Position::new(3, 4)));
        assert_eq!(parse_move(" 6,5 "), Some(Position::new(6, 5)));
        assert_eq!(parse_move("6 , 5"), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        assert_eq!(parse_move(""), None);
        assert_eq!(parse_move("3"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
    }
}
