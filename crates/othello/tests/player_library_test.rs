//! Tests for plugin discovery and resolution.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use othello::{
    BUNDLED_PLAYERS_DIR, BuiltinRegistry, CallStyle, Capability, Export, GreedyPlayer,
    PACKAGE_MANIFEST, PlayerInstance, PluginError, PluginLoader,
};
use othello_core::Color;

/// Writes a manifest exporting one built-in player.
fn make_manifest(dir: &Path, filename: &str, symbol: &str, builtin: &str) -> PathBuf {
    let path = dir.join(filename);
    let content = format!(
        r#"[[symbol]]
name = "{symbol}"
builtin = "{builtin}"
"#
    );
    fs::write(&path, content).expect("Failed to write manifest");
    path
}

fn names(loader: &PluginLoader, locations: &[PathBuf]) -> Vec<String> {
    loader
        .candidates(locations)
        .iter()
        .map(|c| c.name().clone())
        .collect()
}

#[test]
fn test_default_dir_scanned_in_name_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "zeta.toml", "Zeta", "greedy");
    make_manifest(dir.path(), "alpha.toml", "Alpha", "random");

    let loader = PluginLoader::new(dir.path());
    assert_eq!(names(&loader, &[]), ["alpha", "zeta"]);
}

#[test]
fn test_skips_private_and_foreign_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "greedy.toml", "Greedy", "greedy");
    make_manifest(dir.path(), "_helpers.toml", "Helpers", "greedy");
    fs::write(dir.path().join("notes.txt"), "not a player").expect("Write failed");
    fs::write(dir.path().join("bot.py"), "print('hi')").expect("Write failed");
    fs::create_dir(dir.path().join("empty_dir")).expect("Mkdir failed");

    let loader = PluginLoader::new(dir.path());
    assert_eq!(names(&loader, &[]), ["greedy"]);
}

#[test]
fn test_package_directories_are_candidates() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let package = dir.path().join("clever");
    fs::create_dir(&package).expect("Mkdir failed");
    make_manifest(&package, PACKAGE_MANIFEST, "Clever", "greedy");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name(), "clever");
    assert!(*candidates[0].package());
    assert_eq!(candidates[0].path(), &package.join(PACKAGE_MANIFEST));
}

#[test]
fn test_same_name_in_two_locations_listed_once() {
    let default = TempDir::new().expect("Failed to create temp dir");
    let extra = TempDir::new().expect("Failed to create temp dir");
    make_manifest(default.path(), "greedy.toml", "Greedy", "greedy");
    make_manifest(extra.path(), "greedy.toml", "Shadow", "random");
    make_manifest(extra.path(), "other.toml", "Other", "random");

    let loader = PluginLoader::new(default.path());
    let candidates = loader.candidates(&[extra.path().to_path_buf()]);
    let found: Vec<&str> = candidates.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(found, ["greedy", "other"]);
    // The default location wins.
    assert!(candidates[0].path().starts_with(default.path()));
}

#[test]
fn test_same_location_twice_listed_once() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "greedy.toml", "Greedy", "greedy");

    let loader = PluginLoader::new(dir.path());
    let again = vec![dir.path().to_path_buf(), dir.path().join("greedy.toml")];
    assert_eq!(names(&loader, &again), ["greedy"]);
}

#[test]
fn test_missing_locations_are_ignored() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let loader = PluginLoader::new(dir.path().join("does_not_exist"));
    let found = loader.candidates(&[dir.path().join("nope.toml")]);
    assert!(found.is_empty());
}

#[test]
fn test_file_location_adds_single_candidate() {
    let default = TempDir::new().expect("Failed to create temp dir");
    let extra = TempDir::new().expect("Failed to create temp dir");
    let file = make_manifest(extra.path(), "solo.toml", "Solo", "random");
    make_manifest(extra.path(), "ignored.toml", "Ignored", "random");

    let loader = PluginLoader::new(default.path());
    assert_eq!(names(&loader, &[file]), ["solo"]);
}

#[test]
fn test_resolve_skips_board_export() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("human.toml"),
        r#"
[[symbol]]
name = "Board"
builtin = "board"

[[symbol]]
name = "Human"
builtin = "human"
"#,
    )
    .expect("Write failed");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let factory = loader
        .resolve(&candidates[0], Capability::Play)
        .expect("Resolve failed");
    assert_eq!(factory.name(), "Human");
    assert_eq!(*factory.call_style(), CallStyle::Contextual);
}

#[test]
fn test_resolve_only_board_is_capability_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "board.toml", "Board", "board");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let err = loader
        .resolve(&candidates[0], Capability::Play)
        .unwrap_err();
    assert!(matches!(err, PluginError::CapabilityNotFound { .. }));
}

#[test]
fn test_resolve_respects_exports_and_privacy() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("mixed.toml"),
        r#"
exports = ["Second"]

[[symbol]]
name = "First"
builtin = "random"

[[symbol]]
name = "_Hidden"
builtin = "random"

[[symbol]]
name = "Second"
builtin = "greedy"
"#,
    )
    .expect("Write failed");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let factory = loader
        .resolve(&candidates[0], Capability::Play)
        .expect("Resolve failed");
    assert_eq!(factory.name(), "Second");
}

#[test]
fn test_train_requires_trainable_symbol() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "greedy.toml", "Greedy", "greedy");
    make_manifest(dir.path(), "random.toml", "Random", "random");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);

    let err = loader.resolve(&candidates[0], Capability::Train).unwrap_err();
    assert_eq!(
        err,
        PluginError::CapabilityNotFound {
            candidate: "greedy".to_string(),
            capability: Capability::Train,
        }
    );

    let factory = loader
        .resolve(&candidates[1], Capability::Train)
        .expect("Resolve failed");
    assert_eq!(*factory.capability(), Capability::Train);
}

#[test]
fn test_trainable_symbol_satisfies_play() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "random.toml", "Random", "random");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let factory = loader
        .resolve(&candidates[0], Capability::Play)
        .expect("Resolve failed");
    let handle = factory.build(Color::White).expect("Build failed");
    assert!(handle.is_trainable());
    assert_eq!(handle.color(), Color::White);
    assert_eq!(handle.name(), "Random");
}

#[test]
fn test_invalid_manifest_is_load_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("broken.toml"), "this is not valid toml !!!@@@")
        .expect("Write failed");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    assert_eq!(candidates.len(), 1);
    let err = loader
        .resolve(&candidates[0], Capability::Play)
        .unwrap_err();
    assert!(matches!(err, PluginError::Load { .. }));
}

#[test]
fn test_unknown_builtin_is_load_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "ghost.toml", "Ghost", "minimax");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let err = loader
        .resolve(&candidates[0], Capability::Play)
        .unwrap_err();
    match err {
        PluginError::Load { message, .. } => assert!(message.contains("minimax")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_manifest_removed_after_discovery_is_load_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = make_manifest(dir.path(), "fleeting.toml", "Fleeting", "greedy");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    fs::remove_file(path).expect("Remove failed");

    let err = loader
        .resolve(&candidates[0], Capability::Play)
        .unwrap_err();
    assert!(matches!(err, PluginError::Load { .. }));
}

#[test]
fn test_build_rejects_non_playable_colors() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "greedy.toml", "Greedy", "greedy");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let factory = loader
        .resolve(&candidates[0], Capability::Play)
        .expect("Resolve failed");

    for color in [Color::Empty, Color::Outer] {
        assert_eq!(
            factory.build(color).unwrap_err(),
            PluginError::InvalidColor(color)
        );
    }
}

#[test]
fn test_command_symbol_capability_from_manifest() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("remote.toml"),
        r#"
[[symbol]]
name = "Remote"
command = ["python3", "bot.py"]
trainable = true
call = "contextual"
"#,
    )
    .expect("Write failed");

    let loader = PluginLoader::new(dir.path());
    let candidates = loader.candidates(&[]);
    let factory = loader
        .resolve(&candidates[0], Capability::Train)
        .expect("Resolve failed");
    assert_eq!(*factory.capability(), Capability::Train);
    assert_eq!(*factory.call_style(), CallStyle::Contextual);
}

#[test]
fn test_bundled_players_resolve() {
    let loader = PluginLoader::new(BUNDLED_PLAYERS_DIR);
    let candidates = loader.candidates(&[]);
    let found: Vec<&str> = candidates.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(found, ["greedy", "human", "random"]);

    for candidate in &candidates {
        loader
            .resolve(candidate, Capability::Play)
            .expect("Bundled player should resolve");
    }
}

#[test]
fn test_default_location_outside_source_tree_is_bundled() {
    let elsewhere = TempDir::new().expect("Failed to create temp dir");
    let dir = PluginLoader::players_dir_from(None, None, elsewhere.path());
    assert_eq!(dir, PathBuf::from(BUNDLED_PLAYERS_DIR));

    let loader = PluginLoader::new(dir);
    assert_eq!(names(&loader, &[]), ["greedy", "human", "random"]);
}

#[test]
fn test_default_location_resolution_order() {
    let env_dir = TempDir::new().expect("Failed to create temp dir");
    let xdg = TempDir::new().expect("Failed to create temp dir");
    let cwd = TempDir::new().expect("Failed to create temp dir");

    // Missing XDG and ./players directories are passed over.
    assert_eq!(
        PluginLoader::players_dir_from(None, Some(xdg.path().to_path_buf()), cwd.path()),
        PathBuf::from(BUNDLED_PLAYERS_DIR)
    );

    let local = cwd.path().join("players");
    fs::create_dir(&local).expect("Mkdir failed");
    assert_eq!(
        PluginLoader::players_dir_from(None, Some(xdg.path().to_path_buf()), cwd.path()),
        local
    );

    let xdg_players = xdg.path().join("othello").join("players");
    fs::create_dir_all(&xdg_players).expect("Mkdir failed");
    assert_eq!(
        PluginLoader::players_dir_from(None, Some(xdg.path().to_path_buf()), cwd.path()),
        xdg_players
    );

    assert_eq!(
        PluginLoader::players_dir_from(
            Some(env_dir.path().to_path_buf()),
            Some(xdg.path().to_path_buf()),
            cwd.path()
        ),
        env_dir.path()
    );
}

#[test]
fn test_loader_keeps_its_default_dir() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let loader = PluginLoader::new(dir.path());
    assert_eq!(loader.default_dir(), dir.path());
}

#[test]
fn test_custom_registry_supplies_builtins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    make_manifest(dir.path(), "steady.toml", "Steady", "steady");
    make_manifest(dir.path(), "greedy.toml", "Greedy", "greedy");

    let mut registry = BuiltinRegistry::empty();
    registry.register(
        "steady",
        Export::Player {
            capability: Capability::Play,
            call_style: CallStyle::Plain,
            build: |color| PlayerInstance::Plain(Box::new(GreedyPlayer::new(color))),
        },
    );
    assert_eq!(registry.names().collect::<Vec<_>>(), ["steady"]);

    let loader = PluginLoader::with_registry(dir.path(), registry);
    let candidates = loader.candidates(&[]);
    // Only the registered name is known to this loader.
    assert!(matches!(
        loader.resolve(&candidates[0], Capability::Play),
        Err(PluginError::Load { .. })
    ));
    let factory = loader
        .resolve(&candidates[1], Capability::Play)
        .expect("Resolve failed");
    assert_eq!(factory.name(), "Steady");
    assert_eq!(factory.build(Color::Black).unwrap().name(), "Steady");
}
