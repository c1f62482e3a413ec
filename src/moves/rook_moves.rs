use crate::board::Board;
use crate::board_location::BoardLocation;
use crate::movement::ray_is_clear;

/// Whether `from` -> `to` is a rook move: a pure rank or file slide with
/// every square strictly between the two empty.
pub fn rook_move_is_valid(from: &BoardLocation, to: &BoardLocation, board: &Board) -> bool {
    let d_row = to.0 - from.0;
    let d_col = to.1 - from.1;
    if (d_row == 0) == (d_col == 0) {
        // Diagonal, crooked, or null.
        return false;
    }
    ray_is_clear(board, from, to)
}
