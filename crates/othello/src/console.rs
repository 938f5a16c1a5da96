//! Console front-end: player selection, board rendering and game loops.

use std::io::{BufRead, Stderr, StdinLock, Stdout, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use othello_core::Color;
use tracing::{info, instrument, warn};

use crate::{
    BoardAdapter, Candidate, Capability, GameState, PlayerFactory, PluginLoader, TrainingAdapter,
    View,
};

const BANNER: &str = r"
   _|_|      _|      _|                  _|  _|
 _|    _|  _|_|_|_|  _|_|_|      _|_|    _|  _|    _|_|
 _|    _|    _|      _|    _|  _|_|_|_|  _|  _|  _|    _|
 _|    _|    _|      _|    _|  _|        _|  _|  _|    _|
   _|_|        _|_|  _|    _|    _|_|_|  _|  _|    _|_|";

/// Human-readable color name.
fn color_name(color: Color) -> &'static str {
    match color {
        Color::Black => "black",
        Color::White => "white",
        Color::Empty => "empty",
        Color::Outer => "outside",
    }
}

/// Terminal front-end reading from `R`, drawing to `W` and sending alerts to
/// `E`.
pub struct ConsoleView<R, W, E> {
    input: R,
    output: W,
    errors: E,
    automatic: bool,
    debug: bool,
}

impl ConsoleView<StdinLock<'static>, Stdout, Stderr> {
    /// A console bound to the process's stdin, stdout and stderr.
    pub fn stdio(automatic: bool, debug: bool) -> Self {
        Self::new(
            std::io::stdin().lock(),
            std::io::stdout(),
            std::io::stderr(),
            automatic,
            debug,
        )
    }
}

impl<R: BufRead, W: Write, E: Write> ConsoleView<R, W, E> {
    /// Creates a console over arbitrary streams.
    ///
    /// With `automatic` the game advances without waiting for Enter; with
    /// `debug` errors are shown with their full chain.
    pub fn new(input: R, output: W, errors: E, automatic: bool, debug: bool) -> Self {
        Self {
            input,
            output,
            errors,
            automatic,
            debug,
        }
    }

    /// The output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// The alert stream.
    pub fn errors(&self) -> &E {
        &self.errors
    }

    fn line(&mut self, msg: &str) {
        if let Err(e) = writeln!(self.output, "{}", msg) {
            warn!(error = %e, "Failed to write to console");
        }
    }

    /// Draws the board with row and column numbers.
    pub fn print_board(&mut self, adapter: &BoardAdapter) {
        self.line("┌─────────────────────┐");
        self.line("│     1 2 3 4 5 6 7 8 │");
        self.line("├───┬─────────────────┤");
        for (i, row) in adapter.view_data().iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            self.line(&format!("│ {} │ {} │", i + 1, cells.join(" ")));
        }
        self.line("└───┴─────────────────┘");
    }

    fn print_score(&mut self, adapter: &BoardAdapter) {
        let score = adapter.score();
        let parts: Vec<String> = [Color::White, Color::Black]
            .into_iter()
            .map(|color| format!("{} = {}", color_name(color), score.get(color)))
            .collect();
        self.line(&format!("Score: {}", parts.join(" ")));
    }

    fn print_result(&mut self, adapter: &BoardAdapter) {
        match (adapter.failure(), adapter.winner()) {
            (Some(_), Some(winner)) => {
                self.line(&format!("Player {} wins by forfeit", color_name(winner)));
            }
            (_, Some(winner)) => self.line(&format!("Player {} wins", color_name(winner))),
            (_, None) => self.line("Draw"),
        }
    }

    fn report_error(&mut self, error: &dyn std::fmt::Debug, display: &dyn std::fmt::Display) {
        if self.debug {
            self.alert(&format!("ERROR: {:?}", error));
        } else {
            self.alert(&format!("ERROR: {}", display));
        }
    }

    /// Prompts until the user picks a candidate that resolves with
    /// `required`.
    ///
    /// Resolution errors are shown and the user picks again.
    ///
    /// # Errors
    ///
    /// Fails if there are no candidates or the input stream closes.
    #[instrument(skip(self, loader, candidates))]
    pub fn choose_factory(
        &mut self,
        loader: &PluginLoader,
        candidates: &[Candidate],
        role: &str,
        required: Capability,
    ) -> Result<PlayerFactory> {
        if candidates.is_empty() {
            bail!("No players found");
        }

        loop {
            self.line(&format!("Select one of the players below to play as {}", role));
            for (idx, candidate) in candidates.iter().enumerate() {
                self.line(&format!("{} - {}", idx, candidate.name()));
            }

            let answer = self.input("Enter the number of the player")?;
            let Ok(idx) = answer.trim().parse::<usize>() else {
                self.alert("Choice must be an integer");
                continue;
            };
            let Some(candidate) = candidates.get(idx) else {
                self.alert("Invalid choice");
                continue;
            };

            match loader.resolve(candidate, required) {
                Ok(factory) => {
                    self.line("");
                    return Ok(factory);
                }
                Err(e) => self.report_error(&e, &e),
            }
        }
    }

    /// Runs one interactive game and returns how it ended.
    ///
    /// # Errors
    ///
    /// Fails if there are no candidates or the input stream closes. A player
    /// failure is not an error: it ends the game as a forfeit.
    #[instrument(skip(self, loader))]
    pub fn run_game(&mut self, loader: &PluginLoader, locations: &[PathBuf]) -> Result<GameState> {
        self.line(BANNER);
        let candidates = loader.candidates(locations);

        let mut seats = Vec::with_capacity(2);
        for color in Color::playable() {
            loop {
                let factory =
                    self.choose_factory(loader, &candidates, color_name(color), Capability::Play)?;
                match factory.build(color) {
                    Ok(handle) => {
                        seats.push(handle);
                        break;
                    }
                    Err(e) => self.report_error(&e, &e),
                }
            }
        }
        let white = seats.pop();
        let black = seats.pop();
        let (Some(black), Some(white)) = (black, white) else {
            bail!("Both seats must be filled");
        };

        let mut adapter = BoardAdapter::new(black, white)?;
        while !adapter.finished() {
            if !self.automatic {
                self.input("Press Enter to continue")?;
            }

            let color = adapter.current_color();
            self.print_board(&adapter);
            self.print_score(&adapter);
            self.line(&format!(
                "Turn: {} ({}, {})\n",
                color_name(color),
                color,
                adapter.player(color).name()
            ));

            match adapter.advance(&mut *self) {
                Ok(true) => {}
                Ok(false) => self.line("No moves for this player"),
                Err(e) => {
                    self.report_error(&e, &e);
                    break;
                }
            }
        }

        self.line("");
        self.print_board(&adapter);
        self.print_score(&adapter);
        self.print_result(&adapter);

        let state = adapter.state();
        info!(?state, "Game finished");
        Ok(state)
    }

    /// Plays `games` automatic games between a trainable black player and
    /// an opponent, returning each outcome.
    ///
    /// # Errors
    ///
    /// Fails if there are no suitable candidates, the input stream closes or
    /// a player cannot be built.
    #[instrument(skip(self, loader))]
    pub fn run_training(
        &mut self,
        loader: &PluginLoader,
        locations: &[PathBuf],
        games: u32,
    ) -> Result<Vec<GameState>> {
        self.line(BANNER);
        let candidates = loader.candidates(locations);
        let trainee = self.choose_factory(loader, &candidates, "trainee (black)", Capability::Train)?;
        let opponent =
            self.choose_factory(loader, &candidates, "opponent (white)", Capability::Play)?;

        let mut outcomes = Vec::with_capacity(games as usize);
        for game in 1..=games {
            let mut trainer =
                TrainingAdapter::new(trainee.build(Color::Black)?, opponent.build(Color::White)?)?;

            loop {
                match trainer.finished() {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => {
                        self.report_error(&e, &e);
                        break;
                    }
                }
                if let Err(e) = trainer.advance(&mut *self) {
                    self.report_error(&e, &e);
                }
            }

            let adapter = trainer.adapter();
            let score = adapter.score();
            let result = match (adapter.failure(), adapter.winner()) {
                (Some(_), Some(w)) => format!("{} wins by forfeit", color_name(w)),
                (_, Some(w)) => format!("{} wins", color_name(w)),
                (_, None) => "draw".to_string(),
            };
            let state = adapter.state();
            self.line(&format!(
                "Game {}/{}: {} (white {} - black {})",
                game, games, result, score.white, score.black
            ));
            outcomes.push(state);
        }

        Ok(outcomes)
    }
}

impl<R: BufRead, W: Write, E: Write> View for ConsoleView<R, W, E> {
    fn print(&mut self, msg: &str) {
        self.line(msg);
    }

    fn alert(&mut self, msg: &str) {
        warn!(%msg, "Alert");
        if let Err(e) = writeln!(self.errors, "{}", msg) {
            warn!(error = %e, "Failed to write alert");
        }
    }

    fn input(&mut self, label: &str) -> Result<String> {
        if let Err(e) = write!(self.output, "{}: ", label).and_then(|_| self.output.flush()) {
            warn!(error = %e, "Failed to write prompt");
        }

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            bail!("Input closed");
        }
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}
