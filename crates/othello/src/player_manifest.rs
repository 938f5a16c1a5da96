//! Plugin manifests: TOML files describing the player symbols a plugin
//! exports.

use std::path::Path;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{CallStyle, PluginError};

/// A parsed plugin manifest.
///
/// ```toml
/// exports = ["Greedy"]
///
/// [[symbol]]
/// name = "Greedy"
/// builtin = "greedy"
///
/// [[symbol]]
/// name = "Remote"
/// command = ["python3", "bot.py"]
/// trainable = true
/// call = "contextual"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerManifest {
    /// Optional explicit export list; when non-empty only these symbols are
    /// considered.
    #[serde(default)]
    exports: Vec<String>,

    /// Declared symbols, in file order.
    #[serde(default, rename = "symbol")]
    symbols: Vec<SymbolEntry>,
}

/// One symbol declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Symbol name; names starting with `_` are private.
    name: String,

    /// Name of a built-in type.
    #[serde(default)]
    builtin: Option<String>,

    /// Program and arguments of an external player process.
    #[serde(default)]
    command: Option<Vec<String>>,

    /// Whether the external process accepts `game_over` events.
    #[serde(default)]
    trainable: bool,

    /// How the external process is called.
    #[serde(default)]
    call: CallStyle,
}

impl SymbolEntry {
    /// Symbol name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Built-in type name, if any.
    pub fn builtin(&self) -> Option<&str> {
        self.builtin.as_deref()
    }

    /// External command line, if any.
    pub fn command(&self) -> Option<&[String]> {
        self.command.as_deref()
    }

    /// Whether an external process accepts `game_over` events.
    pub fn trainable(&self) -> bool {
        self.trainable
    }

    /// Call style of an external process.
    pub fn call(&self) -> CallStyle {
        self.call
    }

    /// Returns `true` for names hidden from resolution.
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

impl PlayerManifest {
    /// Loads a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Load`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::load(path, format!("Failed to read manifest: {}", e)))?;
        Self::parse(&content, path)
    }

    /// Parses manifest text; `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Load`] if the text is not a valid manifest.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PluginError> {
        let manifest: Self = toml::from_str(content)
            .map_err(|e| PluginError::load(path, format!("Failed to parse manifest: {}", e)))?;
        debug!(symbols = manifest.symbols.len(), "Manifest parsed");
        Ok(manifest)
    }

    /// Symbols eligible for resolution, in file order: private names are
    /// dropped, and so is anything missing from a non-empty export list.
    pub fn public_symbols(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.iter().filter(|symbol| {
            !symbol.is_private() && (self.exports.is_empty() || self.exports.contains(&symbol.name))
        })
    }
}
