use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board_location::BoardLocation;
use crate::errors::ChessArbiterError;
use crate::piece::{Color, Piece, PieceKind};

/// The 8x8 grid of optional pieces.
///
/// Rows run top to bottom from black's back rank (row 0) to white's
/// (row 7). The board is a plain value: legality checks clone it freely to
/// simulate moves, so the caller's copy is never aliased.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Read-only view of a cell. The location must be on the board.
    pub fn view(&self, x: &BoardLocation) -> &Option<Piece> {
        &self.cells[x.0 as usize][x.1 as usize]
    }

    /// Mutable access to a cell. The location must be on the board.
    pub fn at(&mut self, x: &BoardLocation) -> &mut Option<Piece> {
        &mut self.cells[x.0 as usize][x.1 as usize]
    }

    /// Places a piece on an empty square.
    pub fn place(&mut self, piece: Piece, x: BoardLocation) -> Result<(), ChessArbiterError> {
        if self.view(&x).is_some() {
            return Err(ChessArbiterError::LocationOccupied(x));
        }
        *self.at(&x) = Some(piece);
        Ok(())
    }

    /// Removes and returns whatever occupies a square.
    pub fn take(&mut self, x: &BoardLocation) -> Option<Piece> {
        self.at(x).take()
    }

    /// Iterates every occupied square in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardLocation, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| ((row as i8, col as i8), piece))
            })
        })
    }

    /// The square holding the given side's king, if one exists. A kingless
    /// board is degraded but non-fatal: check queries treat it as "no check".
    pub fn find_king(&self, color: Color) -> Option<BoardLocation> {
        self.iter()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(location, _)| location)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                match cell {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_take_and_find() -> Result<(), ChessArbiterError> {
        let mut dut = Board::default();
        dut.place(Piece::new(PieceKind::King, Color::White), (7, 4))?;
        dut.place(Piece::new(PieceKind::Pawn, Color::White), (6, 4))?;

        assert!(dut
            .place(Piece::new(PieceKind::Queen, Color::Black), (6, 4))
            .is_err());
        assert_eq!(dut.find_king(Color::White), Some((7, 4)));
        assert_eq!(dut.find_king(Color::Black), None);

        let taken = dut.take(&(6, 4));
        assert_eq!(taken, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert!(dut.view(&(6, 4)).is_none());
        assert_eq!(dut.iter().count(), 1);
        Ok(())
    }

    #[test]
    fn clone_is_a_fresh_value() -> Result<(), ChessArbiterError> {
        let mut original = Board::default();
        original.place(Piece::new(PieceKind::Rook, Color::Black), (0, 0))?;
        let mut scratch = original.clone();
        scratch.take(&(0, 0));
        assert!(original.view(&(0, 0)).is_some());
        assert!(scratch.view(&(0, 0)).is_none());
        Ok(())
    }
}
