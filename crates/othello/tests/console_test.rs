//! Tests for the console front-end with scripted input.

use std::fs;
use std::io::Cursor;

use tempfile::TempDir;

use othello::{ConsoleView, GameState, HumanPlayer, Player, PluginLoader, View};
use othello_core::{Board, Color, Position};

type Console = ConsoleView<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>>;

fn console(input: &str, automatic: bool) -> Console {
    ConsoleView::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        Vec::new(),
        automatic,
        false,
    )
}

fn output(console: &Console) -> String {
    String::from_utf8_lossy(console.output()).into_owned()
}

fn errors(console: &Console) -> String {
    String::from_utf8_lossy(console.errors()).into_owned()
}

fn players_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("greedy.toml"),
        "[[symbol]]\nname = \"Greedy\"\nbuiltin = \"greedy\"\n",
    )
    .expect("Write failed");
    fs::write(
        dir.path().join("random.toml"),
        "[[symbol]]\nname = \"Random\"\nbuiltin = \"random\"\n",
    )
    .expect("Write failed");
    dir
}

#[test]
fn test_automatic_game_runs_to_the_end() {
    let dir = players_dir();
    let loader = PluginLoader::new(dir.path());
    let mut console = console("0\n0\n", true);

    let state = console.run_game(&loader, &[]).expect("Game failed");
    assert!(matches!(state, GameState::Finished { forfeited: false, .. }));

    let text = output(&console);
    assert!(text.contains("0 - greedy"));
    assert!(text.contains("1 - random"));
    assert!(text.contains("│     1 2 3 4 5 6 7 8 │"));
    assert!(text.contains("Turn: black (@, Greedy)"));
    assert!(text.contains("Score: white = "));
}

#[test]
fn test_bad_choices_are_reprompted() {
    let dir = players_dir();
    let loader = PluginLoader::new(dir.path());
    let mut console = console("x\n7\n0\n1\n", true);

    console.run_game(&loader, &[]).expect("Game failed");
    let alerts = errors(&console);
    assert!(alerts.contains("Choice must be an integer"));
    assert!(alerts.contains("Invalid choice"));
    // Alerts stay off the board stream.
    assert!(!output(&console).contains("Invalid choice"));
}

#[test]
fn test_closed_input_is_an_error() {
    let dir = players_dir();
    let loader = PluginLoader::new(dir.path());
    let mut console = console("0\n", true);

    assert!(console.run_game(&loader, &[]).is_err());
}

#[test]
fn test_interactive_game_waits_for_enter() {
    let dir = players_dir();
    let loader = PluginLoader::new(dir.path());
    // Two choices and a single Enter: the game stops at the second pause.
    let mut console = console("0\n0\n\n", false);

    assert!(console.run_game(&loader, &[]).is_err());
    assert_eq!(output(&console).matches("Press Enter to continue").count(), 2);
}

#[test]
fn test_no_players_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let loader = PluginLoader::new(dir.path());
    let mut console = console("0\n", true);

    let err = console.run_game(&loader, &[]).unwrap_err();
    assert!(err.to_string().contains("No players found"));
}

#[test]
fn test_training_reprompts_for_trainable_player() {
    let dir = players_dir();
    let loader = PluginLoader::new(dir.path());
    // Greedy cannot train, so the first pick is rejected.
    let mut console = console("0\n1\n0\n", true);

    let outcomes = console
        .run_training(&loader, &[], 2)
        .expect("Training failed");
    assert_eq!(outcomes.len(), 2);
    assert!(
        outcomes
            .iter()
            .all(|s| matches!(s, GameState::Finished { .. }))
    );

    assert!(errors(&console).contains("No train capability found in player greedy"));
    assert!(output(&console).contains("Game 2/2"));
}

#[test]
fn test_human_player_asks_until_valid() {
    let mut console = console("nonsense\n1 1\n3 4\n", true);
    let mut human = HumanPlayer::new(Color::Black);

    let mv = human
        .play_with_view(Board::new(), &mut console)
        .expect("Human move failed");
    assert_eq!(mv, Position::new(3, 4));

    assert!(output(&console).contains("Valid moves: (3 4) (4 3) (5 6) (6 5)"));
    let alerts = errors(&console);
    assert!(alerts.contains("Expected two numbers"));
    assert!(alerts.contains("1 1 is not a valid move"));
}

#[test]
fn test_input_strips_line_endings() {
    let mut console = console("hello\r\n", true);
    assert_eq!(console.input("Say").unwrap(), "hello");
    assert_eq!(output(&console), "Say: ");
}
