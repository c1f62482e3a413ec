use crate::errors::ChessArbiterError;

/// A board square addressed as `(row, col)`, each in `0..=7`.
///
/// `(0, 0)` is the top-left corner from white's seat, i.e. black's back
/// rank. White pawns advance toward row 0, black pawns toward row 7.
pub type BoardLocation = (i8, i8);

/// Offsets a board location by a row and column delta.
///
/// # Arguments
///
/// * `x` - The current board location.
/// * `d_row` - The row offset.
/// * `d_col` - The column offset.
///
/// # Returns
///
/// * `Result<BoardLocation, ChessArbiterError>` - The new location if it
///   stays on the board, otherwise an out-of-bounds error.
pub fn offset_location(
    x: &BoardLocation,
    d_row: i8,
    d_col: i8,
) -> Result<BoardLocation, ChessArbiterError> {
    let y: BoardLocation = (x.0 + d_row, x.1 + d_col);
    if (y.0 < 0) | (y.0 > 7) | (y.1 < 0) | (y.1 > 7) {
        Err(ChessArbiterError::OutOfBounds(*x, d_row, d_col))
    } else {
        Ok(y)
    }
}

/// Whether a location lies on the 8x8 board.
pub fn on_board(x: &BoardLocation) -> bool {
    (0..8).contains(&x.0) && (0..8).contains(&x.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_on_board() -> Result<(), ChessArbiterError> {
        let start: BoardLocation = (4, 4);
        assert_eq!(offset_location(&start, -1, 0)?, (3, 4));
        assert_eq!(offset_location(&start, 2, -3)?, (6, 1));
        Ok(())
    }

    #[test]
    fn offsets_off_the_edge_fail() {
        assert!(offset_location(&(0, 0), -1, 0).is_err());
        assert!(offset_location(&(7, 7), 0, 1).is_err());
        assert!(offset_location(&(3, 0), 0, -1).is_err());
    }

    #[test]
    fn bounds_predicate() {
        assert!(on_board(&(0, 0)));
        assert!(on_board(&(7, 7)));
        assert!(!on_board(&(8, 0)));
        assert!(!on_board(&(0, -1)));
    }
}
