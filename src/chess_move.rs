use serde::{Deserialize, Serialize};

use crate::board_location::BoardLocation;
use crate::errors::ChessArbiterError;
use crate::piece::PieceKind;

/// A move proposed by the caller, not yet validated.
///
/// The promotion choice is a required input whenever the move pushes a pawn
/// to the far rank; how it was solicited (UI, script, network message) is
/// the caller's concern, never the engine's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMove {
    pub from: BoardLocation,
    pub to: BoardLocation,
    pub promotion: Option<PieceKind>,
}

impl CandidateMove {
    pub const fn new(from: BoardLocation, to: BoardLocation) -> Self {
        CandidateMove {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: BoardLocation, to: BoardLocation, kind: PieceKind) -> Self {
        CandidateMove {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parses long algebraic notation ("e2e4", "e7e8q") into a candidate.
    ///
    /// # Arguments
    /// * `x` - The notation string, 4 or 5 characters.
    ///
    /// # Returns
    /// * `Ok(CandidateMove)` on success.
    /// * `Err(ChessArbiterError::InvalidFenString)` when the string does not
    ///   name two squares and an optional promotion letter.
    pub fn from_long_algebraic(x: &str) -> Result<Self, ChessArbiterError> {
        let invalid = || ChessArbiterError::InvalidFenString(x.to_string());
        let x = x.trim();
        if x.len() < 4 || x.len() > 5 {
            return Err(invalid());
        }
        let bytes = x.as_bytes();
        let from = parse_square(bytes[0] as char, bytes[1] as char).ok_or_else(invalid)?;
        let to = parse_square(bytes[2] as char, bytes[3] as char).ok_or_else(invalid)?;
        let promotion = if x.len() == 5 {
            Some(match (bytes[4] as char).to_ascii_lowercase() {
                'q' => PieceKind::Queen,
                'r' => PieceKind::Rook,
                'b' => PieceKind::Bishop,
                'n' => PieceKind::Knight,
                _ => return Err(invalid()),
            })
        } else {
            None
        };
        Ok(CandidateMove {
            from,
            to,
            promotion,
        })
    }
}

/// Converts a file letter and rank digit to `(row, col)`.
/// Rank 8 is row 0; rank 1 is row 7.
pub fn parse_square(file: char, rank: char) -> Option<BoardLocation> {
    let col = match file {
        'a'..='h' => file as i8 - 'a' as i8,
        _ => return None,
    };
    let row = match rank {
        '1'..='8' => 8 - (rank as i8 - '0' as i8),
        _ => return None,
    };
    Some((row, col))
}

/// Renders `(row, col)` back to algebraic ("e4").
pub fn square_to_string(x: &BoardLocation) -> String {
    let file = (b'a' + x.1 as u8) as char;
    let rank = (b'0' + (8 - x.0) as u8) as char;
    format!("{}{}", file, rank)
}

/// Record of one applied move, kept append-only in the game history.
///
/// `is_double_push` is what arms the en passant window for exactly the
/// next ply; the special flags let the caller replay or display the game
/// without re-deriving move classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: BoardLocation,
    pub to: BoardLocation,
    pub moved_kind: PieceKind,
    pub is_capture: bool,
    pub is_double_push: bool,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub is_promotion: bool,
}
