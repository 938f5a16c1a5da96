//! Player types compiled into the binary, addressable from manifests.

use std::collections::BTreeMap;

use othello_core::Color;
use tracing::instrument;

use crate::players::{GreedyPlayer, HumanPlayer, PlayerInstance, RandomPlayer};
use crate::{CallStyle, Capability};

/// Constructor for a built-in player type.
pub type Build = fn(Color) -> PlayerInstance;

/// Something a manifest can export by builtin name.
#[derive(Debug, Clone, Copy)]
pub enum Export {
    /// The board type itself. Never eligible as a player.
    Board,
    /// A player type.
    Player {
        /// What the type implements.
        capability: Capability,
        /// How the type wants to be called.
        call_style: CallStyle,
        /// Constructor.
        build: Build,
    },
}

/// Name → export table consulted when a manifest uses `builtin = "..."`.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    exports: BTreeMap<String, Export>,
}

impl BuiltinRegistry {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Self {
            exports: BTreeMap::new(),
        }
    }

    /// Adds or replaces an export.
    #[instrument(skip(self, export))]
    pub fn register(&mut self, name: &str, export: Export) -> &mut Self {
        self.exports.insert(name.to_string(), export);
        self
    }

    /// Looks up an export by name.
    pub fn get(&self, name: &str) -> Option<Export> {
        self.exports.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }
}

impl Default for BuiltinRegistry {
    /// The bundled players: `random`, `greedy`, `human`, plus `board`.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("board", Export::Board)
            .register(
                "random",
                Export::Player {
                    capability: Capability::Train,
                    call_style: CallStyle::Plain,
                    build: |color| PlayerInstance::Trainable(Box::new(RandomPlayer::new(color))),
                },
            )
            .register(
                "greedy",
                Export::Player {
                    capability: Capability::Play,
                    call_style: CallStyle::Plain,
                    build: |color| PlayerInstance::Plain(Box::new(GreedyPlayer::new(color))),
                },
            )
            .register(
                "human",
                Export::Player {
                    capability: Capability::Play,
                    call_style: CallStyle::Contextual,
                    build: |color| PlayerInstance::Plain(Box::new(HumanPlayer::new(color))),
                },
            );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_capabilities_match_instances() {
        let registry = BuiltinRegistry::default();
        for name in registry.names() {
            if let Some(Export::Player {
                capability, build, ..
            }) = registry.get(name)
            {
                assert_eq!(build(Color::Black).capability(), capability, "{}", name);
            }
        }
    }

    #[test]
    fn test_board_is_registered_but_not_a_player() {
        let registry = BuiltinRegistry::default();
        assert!(matches!(registry.get("board"), Some(Export::Board)));
        assert!(registry.get("nope").is_none());
    }
}
