//! The Othello board: cell storage, move legality and flips.

use std::collections::BTreeSet;
use std::str::FromStr;

use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use crate::{BoardError, Color, Direction, Position};

/// Width and height of the playable region.
pub const BOARD_SIZE: usize = 8;

/// Upper bound on plies in a game (60 empty cells at the start).
///
/// Informational only: the engine does not stop a game when it is reached.
pub const MAX_TURNS: u32 = 60;

/// Side of the stored grid: the playable region plus a one-cell border.
const GRID: usize = BOARD_SIZE + 2;

/// An 8x8 Othello board surrounded by an `Outer` border.
///
/// Rows and columns 1..=8 are playable; rows and columns 0 and 9 always read
/// [`Color::Outer`] and are never written. Any position further out also reads
/// `Outer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Color; GRID]; GRID],
    turns: u32,
}

impl Board {
    /// Every playable position, in row-major order.
    pub const POSITIONS: [Position; BOARD_SIZE * BOARD_SIZE] = playable_positions();

    /// Creates a board in the standard starting layout.
    ///
    /// The centre is `(4,4)` and `(5,5)` white, `(4,5)` and `(5,4)` black.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::blank();
        board.set(Position::new(4, 4), Color::White);
        board.set(Position::new(4, 5), Color::Black);
        board.set(Position::new(5, 4), Color::Black);
        board.set(Position::new(5, 5), Color::White);
        board
    }

    /// All playable cells empty, border `Outer`.
    fn blank() -> Self {
        let mut cells = [[Color::Outer; GRID]; GRID];
        for pos in Self::POSITIONS {
            cells[pos.row as usize][pos.col as usize] = Color::Empty;
        }
        Self { cells, turns: 0 }
    }

    /// Builds a board from eight lines of eight cell symbols.
    ///
    /// Blank lines and surrounding whitespace are ignored. The turn counter
    /// starts at zero.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidOperation`] if there are not exactly eight
    /// rows of eight symbols, or a symbol is unknown or `?`.
    #[instrument(skip(text))]
    pub fn from_rows(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidOperation(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Self::blank();
        for (row_idx, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(BoardError::InvalidOperation(format!(
                    "row {} has {} cells, expected {}",
                    row_idx + 1,
                    symbols.len(),
                    BOARD_SIZE
                )));
            }

            for (col_idx, symbol) in symbols.into_iter().enumerate() {
                let color = Color::from_symbol(symbol)
                    .filter(|c| *c != Color::Outer)
                    .ok_or_else(|| {
                        BoardError::InvalidOperation(format!(
                            "unexpected cell symbol {:?} at row {}",
                            symbol,
                            row_idx + 1
                        ))
                    })?;
                board.set(
                    Position::new(row_idx as i32 + 1, col_idx as i32 + 1),
                    color,
                );
            }
        }

        Ok(board)
    }

    /// Returns the color at `pos`; anything off the playable region is `Outer`.
    pub fn get(&self, pos: Position) -> Color {
        if Self::is_playable(pos) {
            self.cells[pos.row as usize][pos.col as usize]
        } else {
            Color::Outer
        }
    }

    fn set(&mut self, pos: Position, color: Color) {
        debug_assert!(Self::is_playable(pos), "write outside playable region");
        self.cells[pos.row as usize][pos.col as usize] = color;
    }

    fn is_playable(pos: Position) -> bool {
        (1..=BOARD_SIZE as i32).contains(&pos.row) && (1..=BOARD_SIZE as i32).contains(&pos.col)
    }

    /// Plies played on this board.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Legal moves for `color`, in row-major order.
    ///
    /// A cell is legal when it is empty and at least one direction from it
    /// holds a run of opponent discs closed by a disc of `color`. Returns an
    /// empty set for non-playable colors.
    #[instrument(skip(self))]
    pub fn valid_moves(&self, color: Color) -> BTreeSet<Position> {
        if !color.is_playable() {
            return BTreeSet::new();
        }

        Self::POSITIONS
            .iter()
            .copied()
            .filter(|pos| self.get(*pos) == Color::Empty)
            .filter(|pos| {
                Direction::iter().any(|dir| self.find_bracket(*pos, color, dir).is_some())
            })
            .collect()
    }

    /// Returns `true` if `color` has at least one legal move.
    pub fn has_moves(&self, color: Color) -> bool {
        color.is_playable()
            && Self::POSITIONS.iter().any(|pos| {
                self.get(*pos) == Color::Empty
                    && Direction::iter().any(|dir| self.find_bracket(*pos, color, dir).is_some())
            })
    }

    /// Places a disc of `color` at `mv` and flips every bracketed run.
    ///
    /// All brackets are located before any disc is flipped, so a flip along
    /// one direction never influences another direction of the same move.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidOperation`] if `color` is not black or white.
    /// - [`BoardError::InvalidMove`] if `mv` is not a legal move for `color`.
    #[instrument(skip(self), fields(turn = self.turns))]
    pub fn play(&mut self, mv: Position, color: Color) -> Result<&mut Self, BoardError> {
        color.opposite()?;

        if !self.valid_moves(color).contains(&mv) {
            return Err(BoardError::InvalidMove {
                position: mv,
                color,
            });
        }

        self.set(mv, color);

        let brackets: Vec<(Direction, Position)> = Direction::iter()
            .filter_map(|dir| self.find_bracket(mv, color, dir).map(|end| (dir, end)))
            .collect();

        let mut flipped = 0;
        for (dir, bracket) in brackets {
            let mut square = mv + dir;
            while square != bracket {
                self.set(square, color);
                flipped += 1;
                square += dir;
            }
        }

        self.turns += 1;
        debug!(position = %mv, ?color, flipped, "Move applied");
        Ok(self)
    }

    /// Finds the disc of `color` closing a run of opponent discs that starts
    /// one step from `origin` along `direction`.
    ///
    /// Returns `None` when the first step already holds `color` (nothing to
    /// flip) or when the run ends on an empty or outer cell.
    fn find_bracket(&self, origin: Position, color: Color, direction: Direction) -> Option<Position> {
        let opponent = color.opposite().ok()?;

        let mut pos = origin + direction;
        if self.get(pos) == color {
            return None;
        }

        while self.get(pos) == opponent {
            pos += direction;
        }

        (self.get(pos) == color).then_some(pos)
    }

    /// Disc counts as `(white, black)`.
    pub fn score(&self) -> (usize, usize) {
        let count = |color: Color| {
            Self::POSITIONS
                .iter()
                .filter(|pos| self.get(**pos) == color)
                .count()
        };
        (count(Color::White), count(Color::Black))
    }

    /// Returns an independent copy of this board.
    ///
    /// Handed to players so they can explore moves without touching the
    /// authoritative board.
    pub fn get_clone(&self) -> Board {
        self.clone()
    }

    /// The playable 8x8 region, border stripped, row by row.
    pub fn view_data(&self) -> [[Color; BOARD_SIZE]; BOARD_SIZE] {
        let mut view = [[Color::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in view.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r + 1][1..=BOARD_SIZE]);
        }
        view
    }

    /// The playable rows as symbol strings, e.g. `"...o@..."`.
    pub fn rows(&self) -> Vec<String> {
        self.view_data()
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

const fn playable_positions() -> [Position; BOARD_SIZE * BOARD_SIZE] {
    let mut out = [Position::new(0, 0); BOARD_SIZE * BOARD_SIZE];
    let mut i = 0;
    while i < BOARD_SIZE * BOARD_SIZE {
        out[i] = Position::new((i / BOARD_SIZE) as i32 + 1, (i % BOARD_SIZE) as i32 + 1);
        i += 1;
    }
    out
}
