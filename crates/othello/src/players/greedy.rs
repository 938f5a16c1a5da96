//! Greedy player: maximise discs after the move.

use anyhow::Result;
use othello_core::{Board, Color, Position};
use tracing::{debug, instrument};

use super::Player;

/// Picks the legal move that leaves it with the most discs.
///
/// Ties go to the first move in row-major order, so the player is fully
/// deterministic.
#[derive(Debug, Clone)]
pub struct GreedyPlayer {
    color: Color,
}

impl GreedyPlayer {
    /// Creates a greedy player.
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    fn discs_after(&self, board: &Board, mv: Position) -> Result<usize> {
        let mut trial = board.get_clone();
        trial.play(mv, self.color)?;
        let (white, black) = trial.score();
        Ok(if self.color == Color::White { white } else { black })
    }
}

impl Player for GreedyPlayer {
    fn color(&self) -> Color {
        self.color
    }

    #[instrument(skip(self, board), fields(color = ?self.color))]
    fn play(&mut self, board: Board) -> Result<Position> {
        let mut best: Option<(Position, usize)> = None;
        for mv in board.valid_moves(self.color) {
            let discs = self.discs_after(&board, mv)?;
            if best.is_none_or(|(_, top)| discs > top) {
                best = Some((mv, discs));
            }
        }

        let (mv, discs) = best.ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(position = %mv, discs, "Greedy choice");
        Ok(mv)
    }
}
