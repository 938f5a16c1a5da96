//! Command-line interface for the othello binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Othello - matches between pluggable players
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(about = "Play Othello between pluggable players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show full error chains and enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory holding the bundled player manifests
    #[arg(long, global = true)]
    pub players_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game between two chosen players
    Play {
        /// Extra player manifests or directories to search
        paths: Vec<PathBuf>,

        /// Advance without waiting for Enter between turns
        #[arg(short, long)]
        automatic: bool,
    },

    /// Play repeated games so a trainable black player can learn
    Train {
        /// Extra player manifests or directories to search
        paths: Vec<PathBuf>,

        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: u32,
    },

    /// List discovered player candidates
    List {
        /// Extra player manifests or directories to search
        paths: Vec<PathBuf>,
    },
}
