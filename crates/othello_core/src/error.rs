//! Board error types.

use crate::{Color, Position};

/// Error raised by board operations.
///
/// Neither variant is recovered inside the engine: the turn adapter turns
/// them into a forfeit of the side that caused them.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The move is not among the legal moves for the color.
    #[display("Invalid move {} for {:?}", position, color)]
    InvalidMove {
        /// Where the move was attempted.
        position: Position,
        /// Who attempted it.
        color: Color,
    },

    /// The operation is undefined for its arguments.
    #[display("Invalid operation: {}", _0)]
    InvalidOperation(String),
}

impl std::error::Error for BoardError {}
