//! Player capabilities and the handles that bind them to a color.

mod command;
mod greedy;
mod human;
mod random;

pub use command::{CommandPlayer, CommandSpec};
pub use greedy::GreedyPlayer;
pub use human::HumanPlayer;
pub use random::RandomPlayer;

use anyhow::Result;
use othello_core::{Board, Color, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::View;

/// Trait for players that can choose moves.
///
/// A player is constructed for one color and receives a private copy of the
/// board each turn; the returned position should be one of
/// `board.valid_moves(self.color())`. Anything else is treated as a forfeit.
pub trait Player {
    /// The color this player was built for.
    fn color(&self) -> Color;

    /// Chooses a move from a board snapshot.
    fn play(&mut self, board: Board) -> Result<Position>;

    /// Chooses a move with access to the front-end.
    ///
    /// Only called for players resolved with [`CallStyle::Contextual`].
    fn play_with_view(&mut self, board: Board, _view: &mut dyn View) -> Result<Position> {
        self.play(board)
    }
}

/// A player that learns from finished games.
pub trait TrainingPlayer: Player {
    /// Called once when the game ends, with the winner (`None` on a draw)
    /// and the final board.
    fn game_over(&mut self, winner: Option<Color>, board: &Board) -> Result<()>;
}

/// How the adapter invokes a player's move operation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CallStyle {
    /// Board only.
    #[default]
    Plain,
    /// Board plus the front-end view.
    Contextual,
}

/// The operation surface a plugin symbol must offer to be eligible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Can play moves.
    Play,
    /// Can play moves and receives the game-over notification.
    Train,
}

impl Capability {
    /// Returns `true` if something providing `self` may be used where
    /// `required` is asked for.
    pub fn satisfies(self, required: Capability) -> bool {
        self >= required
    }
}

/// A constructed player, tagged with the capability set it implements.
pub enum PlayerInstance {
    /// Plays moves only.
    Plain(Box<dyn Player>),
    /// Plays moves and learns from results.
    Trainable(Box<dyn TrainingPlayer>),
}

impl PlayerInstance {
    /// The capability set this instance implements.
    pub fn capability(&self) -> Capability {
        match self {
            PlayerInstance::Plain(_) => Capability::Play,
            PlayerInstance::Trainable(_) => Capability::Train,
        }
    }

    fn color(&self) -> Color {
        match self {
            PlayerInstance::Plain(p) => p.color(),
            PlayerInstance::Trainable(p) => p.color(),
        }
    }
}

impl std::fmt::Debug for PlayerInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlayerInstance")
            .field(&self.capability())
            .field(&self.color())
            .finish()
    }
}

/// A player bound to a color, ready to be seated in a game.
///
/// The call style is fixed when the plugin is resolved; the adapter never
/// inspects the player again to decide how to call it.
#[derive(Debug)]
pub struct PlayerHandle {
    name: String,
    color: Color,
    call_style: CallStyle,
    instance: PlayerInstance,
}

impl PlayerHandle {
    /// Binds an instance to a name and call style. The color is taken from
    /// the instance.
    pub fn new(name: impl Into<String>, call_style: CallStyle, instance: PlayerInstance) -> Self {
        Self {
            name: name.into(),
            color: instance.color(),
            call_style,
            instance,
        }
    }

    /// Wraps a plain player.
    pub fn plain(name: impl Into<String>, call_style: CallStyle, player: Box<dyn Player>) -> Self {
        Self::new(name, call_style, PlayerInstance::Plain(player))
    }

    /// Wraps a trainable player.
    pub fn trainable(
        name: impl Into<String>,
        call_style: CallStyle,
        player: Box<dyn TrainingPlayer>,
    ) -> Self {
        Self::new(name, call_style, PlayerInstance::Trainable(player))
    }

    /// Display name of the plugin symbol this handle came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The color this handle plays.
    pub fn color(&self) -> Color {
        self.color
    }

    /// How the player is invoked.
    pub fn call_style(&self) -> CallStyle {
        self.call_style
    }

    /// The capability set of the wrapped player.
    pub fn capability(&self) -> Capability {
        self.instance.capability()
    }

    /// Returns `true` if the player receives game-over notifications.
    pub fn is_trainable(&self) -> bool {
        matches!(self.instance, PlayerInstance::Trainable(_))
    }

    /// Asks the player for a move, passing the view only to contextual
    /// players.
    #[instrument(skip(self, board, view), fields(player = %self.name, color = ?self.color))]
    pub fn play(&mut self, board: Board, view: &mut dyn View) -> Result<Position> {
        debug!(call_style = %self.call_style, "Requesting move");
        match (&mut self.instance, self.call_style) {
            (PlayerInstance::Plain(p), CallStyle::Plain) => p.play(board),
            (PlayerInstance::Plain(p), CallStyle::Contextual) => p.play_with_view(board, view),
            (PlayerInstance::Trainable(p), CallStyle::Plain) => p.play(board),
            (PlayerInstance::Trainable(p), CallStyle::Contextual) => {
                p.play_with_view(board, view)
            }
        }
    }

    /// Delivers the game-over notification.
    ///
    /// Returns `None` for plain players, which have no such operation.
    #[instrument(skip(self, board), fields(player = %self.name))]
    pub fn game_over(&mut self, winner: Option<Color>, board: &Board) -> Option<Result<()>> {
        match &mut self.instance {
            PlayerInstance::Plain(_) => None,
            PlayerInstance::Trainable(p) => Some(p.game_over(winner, board)),
        }
    }
}
