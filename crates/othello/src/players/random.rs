//! Random-move player.

use anyhow::Result;
use othello_core::{Board, Color, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use super::{Player, TrainingPlayer};

/// Picks uniformly among the legal moves.
///
/// Also implements [`TrainingPlayer`]: it keeps a tally of the results it is
/// told about, which makes it a convenient trainee for self-play runs.
#[derive(Debug)]
pub struct RandomPlayer {
    color: Color,
    rng: StdRng,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl RandomPlayer {
    /// Creates a random player seeded from the OS.
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::from_entropy())
    }

    /// Creates a reproducible random player.
    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }

    fn with_rng(color: Color, rng: StdRng) -> Self {
        Self {
            color,
            rng,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Results received so far as `(wins, losses, draws)`.
    pub fn record(&self) -> (u32, u32, u32) {
        (self.wins, self.losses, self.draws)
    }
}

impl Player for RandomPlayer {
    fn color(&self) -> Color {
        self.color
    }

    #[instrument(skip(self, board), fields(color = ?self.color))]
    fn play(&mut self, board: Board) -> Result<Position> {
        let moves: Vec<Position> = board.valid_moves(self.color).into_iter().collect();
        let choice = moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No valid moves available"))?;
        debug!(position = %choice, options = moves.len(), "Random choice");
        Ok(choice)
    }
}

impl TrainingPlayer for RandomPlayer {
    #[instrument(skip(self, board), fields(color = ?self.color))]
    fn game_over(&mut self, winner: Option<Color>, board: &Board) -> Result<()> {
        match winner {
            Some(c) if c == self.color => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
        let (white, black) = board.score();
        let (wins, losses, draws) = self.record();
        info!(?winner, white, black, wins, losses, draws, "Game over");
        Ok(())
    }
}
