//! Errors used throughout the rules engine.
//!
//! A single crate-wide error enum is returned by state-changing operations
//! and parsing helpers. Validity *queries* never error: they fail closed and
//! return `false` on ambiguous input, so only the applier and the fixture
//! parser produce these variants. The engine carries no user-facing text;
//! the match service owns the translation to player-visible messages.

use thiserror::Error;

use crate::board_location::BoardLocation;
use crate::piece::PieceKind;

/// Unified error type for the rules engine.
///
/// Every variant is a local, recoverable-by-caller condition; nothing here
/// aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessArbiterError {
    /// A location offset by `(d_row, d_col)` would leave the board.
    #[error("location {0:?} offset by ({1},{2}) leaves the board")]
    OutOfBounds(BoardLocation, i8, i8),

    /// Two pieces may not share a square.
    #[error("board location {0:?} is already occupied")]
    LocationOccupied(BoardLocation),

    /// Geometry, obstruction, turn, or ownership failure.
    #[error("move from {from:?} to {to:?} violates movement rules")]
    InvalidMove { from: BoardLocation, to: BoardLocation },

    /// A geometrically valid move that would expose the mover's own king.
    #[error("move from {from:?} to {to:?} would leave own king attacked")]
    SelfCheck { from: BoardLocation, to: BoardLocation },

    /// A pawn reached the far rank with no replacement kind, or the caller
    /// named a kind a pawn cannot become.
    #[error("promotion at {at:?} requires queen, rook, bishop, or knight; got {choice:?}")]
    InvalidPromotion {
        at: BoardLocation,
        choice: Option<PieceKind>,
    },

    /// A move was attempted after the game reached a terminal state.
    #[error("game already reached a terminal state")]
    GameAlreadyOver,

    /// A candidate move referenced a square outside the board.
    #[error("malformed state: square {0:?} is outside the board")]
    MalformedState(BoardLocation),

    /// The fixture string could not be parsed as a position.
    #[error("invalid FEN string: {0}")]
    InvalidFenString(String),
}
