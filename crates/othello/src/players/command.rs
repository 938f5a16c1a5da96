//! Player implemented by an external process speaking JSON lines.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::{Context, Result, anyhow, bail};
use derive_getters::Getters;
use derive_new::new;
use othello_core::{Board, Color, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{Player, TrainingPlayer};
use crate::View;

/// How to launch an external player process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct CommandSpec {
    /// Executable to run.
    program: String,
    /// Arguments passed to the executable.
    args: Vec<String>,
    /// Working directory for the process.
    cwd: Option<PathBuf>,
}

/// Message sent to the player process, one JSON object per line.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Request<'a> {
    Start {
        color: Color,
    },
    Play {
        board: Vec<String>,
        moves: Vec<Position>,
        turn: u32,
    },
    Answer {
        text: &'a str,
    },
    GameOver {
        winner: Option<Color>,
        board: Vec<String>,
    },
}

/// Message read back from the player process.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Reply {
    Move(Position),
    Input(String),
    Print(String),
}

/// A player running in a child process.
///
/// The process receives a `start` event on launch, a `play` event per turn
/// and, when trainable, a `game_over` event. It answers `play` with
/// `{"move":{"row":r,"col":c}}`; a contextual player may first send
/// `{"input":"label"}` (answered with an `answer` event) or
/// `{"print":"text"}`. The child is killed when the player is dropped.
pub struct CommandPlayer {
    name: String,
    color: Color,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl CommandPlayer {
    /// Launches the process and tells it its color.
    ///
    /// # Errors
    ///
    /// Fails if the process cannot be started or the start event cannot be
    /// written.
    #[instrument(skip(name, spec), fields(program = %spec.program))]
    pub fn spawn(name: impl Into<String>, spec: &CommandSpec, color: Color) -> Result<Self> {
        let name = name.into();
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to start player process {}", spec.program))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Player process has no stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Player process has no stdout"))?;

        let mut player = Self {
            name,
            color,
            child,
            stdin,
            stdout: BufReader::new(stdout),
        };
        player.send(&Request::Start { color })?;
        info!(player = %player.name, pid = player.child.id(), "Player process started");
        Ok(player)
    }

    fn send(&mut self, request: &Request<'_>) -> Result<()> {
        let line = serde_json::to_string(request)?;
        debug!(player = %self.name, %line, "Sending");
        writeln!(self.stdin, "{}", line).context("Failed to write to player process")?;
        self.stdin
            .flush()
            .context("Failed to write to player process")
    }

    fn receive(&mut self) -> Result<Reply> {
        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .context("Failed to read from player process")?;
        if read == 0 {
            bail!("Player process {} closed its output", self.name);
        }
        debug!(player = %self.name, line = %line.trim_end(), "Received");
        serde_json::from_str(line.trim())
            .with_context(|| format!("Malformed reply from player process: {}", line.trim()))
    }

    fn request_move(&mut self, board: Board, mut view: Option<&mut dyn View>) -> Result<Position> {
        self.send(&Request::Play {
            board: board.rows(),
            moves: board.valid_moves(self.color).into_iter().collect(),
            turn: board.turns(),
        })?;

        loop {
            match self.receive()? {
                Reply::Move(position) => return Ok(position),
                Reply::Print(msg) => match view.as_deref_mut() {
                    Some(v) => v.print(&msg),
                    None => debug!(player = %self.name, %msg, "Player output"),
                },
                Reply::Input(label) => {
                    let v = view.as_deref_mut().ok_or_else(|| {
                        anyhow!("Player asked for input but was not given a view")
                    })?;
                    let text = v.input(&label)?;
                    self.send(&Request::Answer { text: &text })?;
                }
            }
        }
    }
}

impl std::fmt::Debug for CommandPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPlayer")
            .field("name", &self.name)
            .field("color", &self.color)
            .field("pid", &self.child.id())
            .finish()
    }
}

impl Player for CommandPlayer {
    fn color(&self) -> Color {
        self.color
    }

    #[instrument(skip(self, board), fields(player = %self.name))]
    fn play(&mut self, board: Board) -> Result<Position> {
        self.request_move(board, None)
    }

    #[instrument(skip(self, board, view), fields(player = %self.name))]
    fn play_with_view(&mut self, board: Board, view: &mut dyn View) -> Result<Position> {
        self.request_move(board, Some(view))
    }
}

impl TrainingPlayer for CommandPlayer {
    #[instrument(skip(self, board), fields(player = %self.name))]
    fn game_over(&mut self, winner: Option<Color>, board: &Board) -> Result<()> {
        self.send(&Request::GameOver {
            winner,
            board: board.rows(),
        })
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!(player = %self.name, error = %e, "Player process already exited");
        }
        if let Err(e) = self.child.wait() {
            warn!(player = %self.name, error = %e, "Failed to reap player process");
        }
    }
}
