//! Self-play training: a turn adapter that reports results to its trainee.

use othello_core::Color;
use tracing::{info, instrument, warn};

use crate::{BoardAdapter, Capability, GameError, PlayerHandle, PluginError, View};

/// Wraps a [`BoardAdapter`] whose black player is trainable.
///
/// The trainee receives the game-over notification exactly once, the first
/// time [`TrainingAdapter::finished`] observes the end of the game.
#[derive(Debug)]
pub struct TrainingAdapter {
    adapter: BoardAdapter,
    trainee: Color,
    notified: bool,
}

impl TrainingAdapter {
    /// Seats `trainee` as black and `opponent` as white.
    ///
    /// # Errors
    ///
    /// - [`PluginError::CapabilityNotFound`] if the trainee is not trainable.
    /// - [`PluginError::InvalidColor`] if a handle was built for the other
    ///   seat.
    #[instrument(skip(trainee, opponent), fields(trainee = %trainee.name()))]
    pub fn new(trainee: PlayerHandle, opponent: PlayerHandle) -> Result<Self, PluginError> {
        if !trainee.is_trainable() {
            return Err(PluginError::CapabilityNotFound {
                candidate: trainee.name().to_string(),
                capability: Capability::Train,
            });
        }

        Ok(Self {
            adapter: BoardAdapter::new(trainee, opponent)?,
            trainee: Color::Black,
            notified: false,
        })
    }

    /// Plays one ply; see [`BoardAdapter::advance`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`BoardAdapter::advance`].
    pub fn advance(&mut self, view: &mut dyn View) -> Result<bool, GameError> {
        self.adapter.advance(view)
    }

    /// Returns `true` once the game is over, notifying the trainee the first
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Player`] if the trainee's notification fails.
    /// The notification counts as delivered either way.
    #[instrument(skip(self))]
    pub fn finished(&mut self) -> Result<bool, GameError> {
        if !self.adapter.finished() {
            return Ok(false);
        }

        if !self.notified {
            self.notified = true;
            let winner = self.adapter.winner();
            let board = self.adapter.board().get_clone();
            info!(?winner, forfeit = self.adapter.has_failure(), "Notifying trainee");

            let trainee = self.adapter.player_mut(self.trainee);
            if let Some(Err(e)) = trainee.game_over(winner, &board) {
                warn!(error = %e, "Trainee failed to process game over");
                return Err(GameError::Player {
                    color: self.trainee,
                    message: format!("{:#}", e),
                });
            }
        }

        Ok(true)
    }

    /// Returns `true` once the trainee has been notified.
    pub fn notified(&self) -> bool {
        self.notified
    }

    /// The wrapped adapter, for reading score, board and winner.
    pub fn adapter(&self) -> &BoardAdapter {
        &self.adapter
    }
}
