//! Othello - matches between pluggable players
//!
//! This library seats two player implementations at an Othello board and
//! drives the game one ply at a time.
//!
//! # Architecture
//!
//! - **Players**: the [`Player`] and [`TrainingPlayer`] capabilities, bound to a
//!   color by a [`PlayerHandle`]
//! - **Loader**: [`PluginLoader`] discovers TOML player manifests and resolves
//!   them into [`PlayerFactory`] values
//! - **Adapters**: [`BoardAdapter`] runs a game; [`TrainingAdapter`] also
//!   reports the result to a trainable player
//! - **Console**: a thin terminal front-end over the above
//!
//! # Example
//!
//! ```no_run
//! use othello::{BoardAdapter, Capability, ConsoleView, PluginLoader};
//! use othello_core::Color;
//!
//! # fn example() -> anyhow::Result<()> {
//! let loader = PluginLoader::new("players");
//! let candidates = loader.candidates(&[]);
//! let greedy = candidates.iter().find(|c| c.name() == "greedy").unwrap();
//! let factory = loader.resolve(greedy, Capability::Play)?;
//!
//! let mut adapter = BoardAdapter::new(factory.build(Color::Black)?, factory.build(Color::White)?)?;
//! let mut view = ConsoleView::stdio(true, false);
//! while !adapter.finished() {
//!     adapter.advance(&mut view)?;
//! }
//! println!("winner: {:?}", adapter.winner());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod builtins;
mod console;
mod error;
mod player_library;
mod player_manifest;
mod players;
mod training;
mod view;

// Crate-level exports - Errors
pub use error::{GameError, PluginError};

// Crate-level exports - Player capabilities
pub use players::{
    CallStyle, Capability, CommandPlayer, CommandSpec, GreedyPlayer, HumanPlayer, Player,
    PlayerHandle, PlayerInstance, RandomPlayer, TrainingPlayer,
};
pub use view::View;

// Crate-level exports - Plugin loading
pub use builtins::{Build, BuiltinRegistry, Export};
pub use player_library::{
    BUNDLED_PLAYERS_DIR, Candidate, PACKAGE_MANIFEST, PLAYERS_ENV, PlayerFactory, PluginLoader,
};
pub use player_manifest::{PlayerManifest, SymbolEntry};

// Crate-level exports - Orchestration
pub use adapter::{BoardAdapter, GameState, Score};
pub use training::TrainingAdapter;

// Crate-level exports - Front-end
pub use console::ConsoleView;
