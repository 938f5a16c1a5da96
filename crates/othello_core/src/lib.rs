//! Othello core - pure game logic
//!
//! This crate holds the rules of Othello and nothing else: no I/O, no player
//! plumbing. The `othello` crate builds match orchestration on top of it.
//!
//! # Architecture
//!
//! - **Color**: the four cell states, with `opposite` for the two playable ones
//! - **Position / Direction**: grid coordinates and the eight step vectors
//! - **Board**: the 8x8 grid with its OUTER border, legal moves and flips
//!
//! # Example
//!
//! ```
//! use othello_core::{Board, Color, Position};
//!
//! # fn example() -> Result<(), othello_core::BoardError> {
//! let mut board = Board::new();
//! assert_eq!(board.valid_moves(Color::Black).len(), 4);
//!
//! board.play(Position::new(3, 4), Color::Black)?;
//! assert_eq!(board.score(), (1, 4));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod color;
mod error;
mod position;

pub use board::{Board, BOARD_SIZE, MAX_TURNS};
pub use color::Color;
pub use error::BoardError;
pub use position::{Direction, Position};
