//! Turn orchestration between two seated players.

use othello_core::{BOARD_SIZE, Board, Color};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{GameError, PlayerHandle, PluginError, View};

/// Disc counts per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// White discs on the board.
    pub white: usize,
    /// Black discs on the board.
    pub black: usize,
}

impl Score {
    /// Count for `color`; zero for non-playable colors.
    pub fn get(&self, color: Color) -> usize {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
            Color::Empty | Color::Outer => 0,
        }
    }

    /// The color with more discs, `None` on a tie.
    pub fn leader(&self) -> Option<Color> {
        match self.white.cmp(&self.black) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl From<(usize, usize)> for Score {
    fn from((white, black): (usize, usize)) -> Self {
        Self { white, black }
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// At least one side can still move and nobody failed.
    InProgress,
    /// The game is over.
    Finished {
        /// Winning color, `None` on a draw.
        winner: Option<Color>,
        /// Whether the game ended because a player failed.
        forfeited: bool,
    },
}

/// Owns the board and both players and advances the game one ply at a time.
///
/// Black moves first. The turn passes after every processed ply, including
/// a pass by a side with no legal move. A player error ends the game as a
/// forfeit of that side.
#[derive(Debug)]
pub struct BoardAdapter {
    board: Board,
    black: PlayerHandle,
    white: PlayerHandle,
    current: Color,
    failure: Option<Color>,
}

impl BoardAdapter {
    /// Seats two players on a fresh board.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidColor`] if a handle was built for the
    /// other seat.
    pub fn new(black: PlayerHandle, white: PlayerHandle) -> Result<Self, PluginError> {
        Self::with_board(Board::new(), black, white)
    }

    /// Seats two players on an existing position, black to move.
    ///
    /// # Errors
    ///
    /// Same as [`BoardAdapter::new`].
    #[instrument(skip(board, black, white), fields(black = %black.name(), white = %white.name()))]
    pub fn with_board(
        board: Board,
        black: PlayerHandle,
        white: PlayerHandle,
    ) -> Result<Self, PluginError> {
        if black.color() != Color::Black {
            return Err(PluginError::InvalidColor(black.color()));
        }
        if white.color() != Color::White {
            return Err(PluginError::InvalidColor(white.color()));
        }

        info!(turn = board.turns(), "Starting game");
        Ok(Self {
            board,
            black,
            white,
            current: Color::Black,
            failure: None,
        })
    }

    /// Plays one ply.
    ///
    /// If the side to move has a legal move, it is asked for one with a
    /// private copy of the board and the move is applied; returns `Ok(true)`.
    /// A side without legal moves is skipped without being called; returns
    /// `Ok(false)`. Either way the turn passes to the other side.
    ///
    /// # Errors
    ///
    /// - [`GameError::Player`] or [`GameError::Board`] when the player fails
    ///   or picks an illegal move. The failure is recorded, the game is over
    ///   and the turn does not pass.
    /// - [`GameError::Finished`] if a failure was already recorded.
    #[instrument(skip(self, view), fields(color = ?self.current, turn = self.board.turns()))]
    pub fn advance(&mut self, view: &mut dyn View) -> Result<bool, GameError> {
        if self.failure.is_some() {
            return Err(GameError::Finished);
        }

        let color = self.current;
        let moved = if self.board.has_moves(color) {
            let snapshot = self.board.get_clone();
            let player = self.player_mut(color);
            let name = player.name().to_string();

            let chosen = match player.play(snapshot, view) {
                Ok(position) => position,
                Err(e) => {
                    warn!(player = %name, error = %e, "Player failed");
                    self.failure = Some(color);
                    return Err(GameError::Player {
                        color,
                        message: format!("{:#}", e),
                    });
                }
            };

            if let Err(e) = self.board.play(chosen, color) {
                warn!(player = %name, error = %e, "Player chose an invalid move");
                self.failure = Some(color);
                return Err(e.into());
            }

            debug!(player = %name, position = %chosen, "Move made");
            true
        } else {
            debug!("No valid moves, passing");
            false
        };

        self.current = color.opposite()?;
        Ok(moved)
    }

    /// Returns `true` once a failure is recorded or neither side can move.
    pub fn finished(&self) -> bool {
        self.failure.is_some()
            || !(self.board.has_moves(Color::White) || self.board.has_moves(Color::Black))
    }

    /// The winner: the opponent of a failed side, otherwise the color with
    /// more discs. `None` on a tie.
    ///
    /// Meaningful once [`BoardAdapter::finished`] is `true`.
    pub fn winner(&self) -> Option<Color> {
        match self.failure {
            Some(failed) => failed.opposite().ok(),
            None => self.score().leader(),
        }
    }

    /// The side whose failure ended the game, if any.
    pub fn failure(&self) -> Option<Color> {
        self.failure
    }

    /// Returns `true` if the game ended by forfeit.
    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        if self.finished() {
            GameState::Finished {
                winner: self.winner(),
                forfeited: self.failure.is_some(),
            }
        } else {
            GameState::InProgress
        }
    }

    /// Disc counts.
    pub fn score(&self) -> Score {
        self.board.score().into()
    }

    /// The playable 8x8 region for rendering.
    pub fn view_data(&self) -> [[Color; BOARD_SIZE]; BOARD_SIZE] {
        self.board.view_data()
    }

    /// The color to move next.
    pub fn current_color(&self) -> Color {
        self.current
    }

    /// The authoritative board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The handle seated as `color`; white for anything but black.
    pub fn player(&self, color: Color) -> &PlayerHandle {
        if color == Color::Black {
            &self.black
        } else {
            &self.white
        }
    }

    pub(crate) fn player_mut(&mut self, color: Color) -> &mut PlayerHandle {
        if color == Color::Black {
            &mut self.black
        } else {
            &mut self.white
        }
    }
}
