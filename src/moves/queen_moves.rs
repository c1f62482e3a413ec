use crate::board::Board;
use crate::board_location::BoardLocation;
use crate::moves::{bishop_moves, rook_moves};

/// Whether `from` -> `to` is a queen move: the union of the rook and
/// bishop rules.
pub fn queen_move_is_valid(from: &BoardLocation, to: &BoardLocation, board: &Board) -> bool {
    rook_moves::rook_move_is_valid(from, to, board)
        || bishop_moves::bishop_move_is_valid(from, to, board)
}
