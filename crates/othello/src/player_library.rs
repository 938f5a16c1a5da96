//! Player plugin discovery and resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use derive_getters::Getters;
use othello_core::Color;
use tracing::{debug, info, instrument, warn};

use crate::builtins::{Build, BuiltinRegistry, Export};
use crate::player_manifest::{PlayerManifest, SymbolEntry};
use crate::players::{CommandPlayer, CommandSpec, PlayerInstance};
use crate::{CallStyle, Capability, PlayerHandle, PluginError};

/// File name of the manifest inside a package directory.
pub const PACKAGE_MANIFEST: &str = "player.toml";

/// The `players` directory next to the workspace sources, used when no other
/// location is configured.
pub const BUNDLED_PLAYERS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../players");

/// Environment variable overriding the bundled players directory.
pub const PLAYERS_ENV: &str = "OTHELLO_PLAYERS";

/// A discovered plugin that has not been loaded yet.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Candidate {
    /// Name shown to the user: the manifest stem or package directory name.
    name: String,
    /// Path of the manifest file.
    path: PathBuf,
    /// Whether the candidate is a package directory.
    package: bool,
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Where a resolved factory gets its players from.
#[derive(Debug, Clone)]
enum Source {
    Builtin(Build),
    Command(CommandSpec),
}

/// A resolved player type: builds a [`PlayerHandle`] for a color.
#[derive(Debug, Clone, Getters)]
pub struct PlayerFactory {
    /// Symbol name.
    name: String,
    /// Manifest the symbol came from.
    path: PathBuf,
    /// Capability set the built players implement.
    capability: Capability,
    /// How the built players are called.
    call_style: CallStyle,
    #[getter(skip)]
    source: Source,
}

impl PlayerFactory {
    /// Builds a player for `color`.
    ///
    /// # Errors
    ///
    /// - [`PluginError::InvalidColor`] unless `color` is black or white.
    /// - [`PluginError::Load`] if an external player process cannot start.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn build(&self, color: Color) -> Result<PlayerHandle, PluginError> {
        if !color.is_playable() {
            return Err(PluginError::InvalidColor(color));
        }

        let instance = match &self.source {
            Source::Builtin(build) => build(color),
            Source::Command(spec) => {
                let player = CommandPlayer::spawn(&self.name, spec, color)
                    .map_err(|e| PluginError::load(&self.path, format!("{:#}", e)))?;
                match self.capability {
                    Capability::Train => PlayerInstance::Trainable(Box::new(player)),
                    Capability::Play => PlayerInstance::Plain(Box::new(player)),
                }
            }
        };

        debug!(?color, capability = %instance.capability(), "Player built");
        Ok(PlayerHandle::new(self.name.clone(), self.call_style, instance))
    }
}

/// Discovers candidate plugins and resolves them into player factories.
///
/// The bundled default location is passed in explicitly; nothing is read
/// from process-wide state.
#[derive(Debug, Clone)]
pub struct PluginLoader {
    default_dir: PathBuf,
    registry: BuiltinRegistry,
}

impl PluginLoader {
    /// Creates a loader with the bundled built-in players.
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self::with_registry(default_dir, BuiltinRegistry::default())
    }

    /// Creates a loader with a custom built-in registry.
    pub fn with_registry(default_dir: impl Into<PathBuf>, registry: BuiltinRegistry) -> Self {
        Self {
            default_dir: default_dir.into(),
            registry,
        }
    }

    /// The bundled default location.
    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Resolves the default location for bundled players.
    ///
    /// Resolution order:
    /// 1. `$OTHELLO_PLAYERS` environment variable
    /// 2. `$XDG_CONFIG_HOME/othello/players`, if it exists
    /// 3. `./players`, if it exists
    /// 4. The `players` directory shipped with this crate's sources
    #[instrument]
    pub fn default_players_dir() -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::players_dir_from(
            std::env::var_os(PLAYERS_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            &cwd,
        )
    }

    /// [`PluginLoader::default_players_dir`] with the environment passed in.
    pub fn players_dir_from(
        players_env: Option<PathBuf>,
        xdg_config_home: Option<PathBuf>,
        cwd: &Path,
    ) -> PathBuf {
        if let Some(dir) = players_env {
            debug!(path = %dir.display(), "Using {} env var", PLAYERS_ENV);
            return dir;
        }

        if let Some(xdg) = xdg_config_home {
            let dir = xdg.join("othello").join("players");
            if dir.is_dir() {
                debug!(path = %dir.display(), "Using XDG_CONFIG_HOME path");
                return dir;
            }
        }

        let local = cwd.join("players");
        if local.is_dir() {
            debug!(path = %local.display(), "Using ./players directory");
            return local;
        }

        debug!(path = BUNDLED_PLAYERS_DIR, "Falling back to bundled players");
        PathBuf::from(BUNDLED_PLAYERS_DIR)
    }

    /// Lists candidates from the default location followed by `locations`.
    ///
    /// Directories are scanned for `*.toml` manifests and package
    /// directories holding a `player.toml`; file locations must themselves
    /// be `*.toml` manifests. Names starting with `_`, other files and
    /// missing locations are skipped. The result keeps discovery order and
    /// holds each name and each manifest at most once.
    #[instrument(skip(self, locations), fields(default = %self.default_dir.display()))]
    pub fn candidates(&self, locations: &[PathBuf]) -> Vec<Candidate> {
        let mut found = Vec::new();
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        for location in std::iter::once(&self.default_dir).chain(locations) {
            let discovered = if location.is_dir() {
                scan_dir(location)
            } else if location.is_file() {
                candidate_from_file(location).into_iter().collect()
            } else {
                debug!(path = %location.display(), "Skipping missing location");
                Vec::new()
            };

            for candidate in discovered {
                let canonical = candidate
                    .path
                    .canonicalize()
                    .unwrap_or_else(|_| candidate.path.clone());
                if !paths.insert(canonical) || !names.insert(candidate.name.clone()) {
                    debug!(
                        name = %candidate.name,
                        path = %candidate.path.display(),
                        "Skipping duplicate candidate"
                    );
                    continue;
                }
                found.push(candidate);
            }
        }

        info!(count = found.len(), "Player candidates enumerated");
        found
    }

    /// Loads `candidate` and picks its first public symbol that satisfies
    /// `required` and is not the board type.
    ///
    /// # Errors
    ///
    /// - [`PluginError::Load`] if the manifest cannot be read or parsed, or a
    ///   symbol examined on the way is malformed.
    /// - [`PluginError::CapabilityNotFound`] if no symbol qualifies.
    #[instrument(skip(self, candidate), fields(candidate = %candidate.name))]
    pub fn resolve(
        &self,
        candidate: &Candidate,
        required: Capability,
    ) -> Result<PlayerFactory, PluginError> {
        let manifest = PlayerManifest::from_file(&candidate.path)?;

        for symbol in manifest.public_symbols() {
            let Some(factory) = self.materialize(symbol, &candidate.path)? else {
                debug!(symbol = %symbol.name(), "Skipping board export");
                continue;
            };

            if factory.capability.satisfies(required) {
                info!(
                    symbol = %factory.name,
                    capability = %factory.capability,
                    call_style = %factory.call_style,
                    "Player resolved"
                );
                return Ok(factory);
            }

            debug!(
                symbol = %factory.name,
                capability = %factory.capability,
                "Symbol lacks required capability"
            );
        }

        warn!("No eligible player symbol");
        Err(PluginError::CapabilityNotFound {
            candidate: candidate.name.clone(),
            capability: required,
        })
    }

    /// Turns a manifest symbol into a factory; `None` for the board export.
    fn materialize(
        &self,
        symbol: &SymbolEntry,
        manifest: &Path,
    ) -> Result<Option<PlayerFactory>, PluginError> {
        let (capability, call_style, source) = match (symbol.builtin(), symbol.command()) {
            (Some(builtin), None) => match self.registry.get(builtin) {
                Some(Export::Board) => return Ok(None),
                Some(Export::Player {
                    capability,
                    call_style,
                    build,
                }) => (capability, call_style, Source::Builtin(build)),
                None => {
                    return Err(PluginError::load(
                        manifest,
                        format!("Symbol {} names unknown builtin {}", symbol.name(), builtin),
                    ));
                }
            },
            (None, Some([program, args @ ..])) => {
                let cwd = manifest.parent().map(Path::to_path_buf);
                let capability = if symbol.trainable() {
                    Capability::Train
                } else {
                    Capability::Play
                };
                let spec = CommandSpec::new(program.clone(), args.to_vec(), cwd);
                (capability, symbol.call(), Source::Command(spec))
            }
            (None, Some([])) => {
                return Err(PluginError::load(
                    manifest,
                    format!("Symbol {} has an empty command", symbol.name()),
                ));
            }
            (Some(_), Some(_)) | (None, None) => {
                return Err(PluginError::load(
                    manifest,
                    format!(
                        "Symbol {} must set exactly one of builtin or command",
                        symbol.name()
                    ),
                ));
            }
        };

        Ok(Some(PlayerFactory {
            name: symbol.name().to_string(),
            path: manifest.to_path_buf(),
            capability,
            call_style,
            source,
        }))
    }
}

/// Returns `true` for names the loader never exposes.
fn is_hidden(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

fn candidate_from_file(path: &Path) -> Option<Candidate> {
    let name = path.file_stem()?.to_str()?;
    if is_hidden(name) || path.extension().and_then(|s| s.to_str()) != Some("toml") {
        debug!(path = %path.display(), "Skipping non-manifest file");
        return None;
    }
    Some(Candidate {
        name: name.to_string(),
        path: path.to_path_buf(),
        package: false,
    })
}

fn candidate_from_package(dir: &Path) -> Option<Candidate> {
    let name = dir.file_name()?.to_str()?;
    let manifest = dir.join(PACKAGE_MANIFEST);
    if is_hidden(name) || !manifest.is_file() {
        debug!(path = %dir.display(), "Skipping non-package directory");
        return None;
    }
    Some(Candidate {
        name: name.to_string(),
        path: manifest,
        package: true,
    })
}

/// Candidates directly inside `dir`, sorted by file name.
fn scan_dir(dir: &Path) -> Vec<Candidate> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Failed to read player directory");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Failed to read directory entry");
                None
            }
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| {
            if path.is_dir() {
                candidate_from_package(path)
            } else {
                candidate_from_file(path)
            }
        })
        .collect()
}
