//! Othello - console front-end
//!
//! Discovers player plugins, lets the user seat two of them and runs games.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use othello::{ConsoleView, GameState, PluginLoader};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let default_dir = cli
        .players_dir
        .clone()
        .unwrap_or_else(PluginLoader::default_players_dir);
    let loader = PluginLoader::new(default_dir);
    info!(players_dir = %loader.default_dir().display(), "Starting othello");

    match cli.command {
        Command::Play { paths, automatic } => run_play(&loader, &paths, automatic, cli.debug),
        Command::Train { paths, games } => run_train(&loader, &paths, games, cli.debug),
        Command::List { paths } => run_list(&loader, &paths),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(loader, debug))]
fn run_play(loader: &PluginLoader, paths: &[PathBuf], automatic: bool, debug: bool) -> Result<()> {
    let mut console = ConsoleView::stdio(automatic, debug);
    let state = console.run_game(loader, paths)?;
    info!(?state, "Done");
    Ok(())
}

#[instrument(skip(loader, debug))]
fn run_train(loader: &PluginLoader, paths: &[PathBuf], games: u32, debug: bool) -> Result<()> {
    let mut console = ConsoleView::stdio(true, debug);
    let outcomes = console.run_training(loader, paths, games)?;

    let forfeits = outcomes
        .iter()
        .filter(|s| matches!(s, GameState::Finished { forfeited: true, .. }))
        .count();
    info!(games = outcomes.len(), forfeits, "Training finished");
    Ok(())
}

fn run_list(loader: &PluginLoader, paths: &[PathBuf]) -> Result<()> {
    let candidates = loader.candidates(paths);
    if candidates.is_empty() {
        println!("No players found");
    }
    for candidate in candidates {
        println!("{:<16} {}", candidate.name(), candidate.path().display());
    }
    Ok(())
}
