//! Error types for plugin resolution and match orchestration.

use std::path::PathBuf;

use othello_core::{BoardError, Color};

use crate::Capability;

/// Error raised while discovering or resolving player plugins.
///
/// Raised before any game starts; the front-end is expected to let the user
/// pick another candidate.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PluginError {
    /// The plugin location could not be opened, parsed or started.
    #[display("Failed to load player from {}: {}", path.display(), message)]
    Load {
        /// Manifest that failed to load.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// No symbol in the plugin satisfies the required capability set.
    #[display("No {} capability found in player {}", capability, candidate)]
    CapabilityNotFound {
        /// Candidate name.
        candidate: String,
        /// The capability set that was required.
        capability: Capability,
    },

    /// Players can only be bound to black or white.
    #[display("Cannot bind a player to {:?}", _0)]
    InvalidColor(Color),
}

impl std::error::Error for PluginError {}

impl PluginError {
    /// Creates a load error for `path`.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Error raised while advancing a game.
///
/// Every variant except [`GameError::Finished`] ends the game as a forfeit of
/// the side whose turn it was.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The move chosen by the player was rejected by the board.
    #[from]
    #[display("{}", _0)]
    Board(BoardError),

    /// The player capability itself failed.
    #[display("Player {:?} failed: {}", color, message)]
    Player {
        /// Side that failed.
        color: Color,
        /// Error chain rendered by the player.
        message: String,
    },

    /// Players could not be seated or notified.
    #[from]
    #[display("{}", _0)]
    Plugin(PluginError),

    /// The game already ended by forfeit.
    #[display("Game is already over")]
    Finished,
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            GameError::Plugin(e) => Some(e),
            GameError::Player { .. } | GameError::Finished => None,
        }
    }
}
