//! The geometry dispatch layer.
//!
//! Answers only "does this piece move that way, over empty squares, onto a
//! capturable target" — check safety lives one layer up in `legality`.

use crate::board::Board;
use crate::board_location::{on_board, BoardLocation};
use crate::game_state::GameState;
use crate::moves::{
    bishop_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves,
};
use crate::piece::{Piece, PieceKind};

/// Whether a move is geometrically valid for the piece, ignoring check
/// safety. Pure; ambiguous input (off-board squares, null targets) fails
/// closed and returns `false`.
pub fn is_geometrically_valid(
    piece: &Piece,
    from: &BoardLocation,
    to: &BoardLocation,
    board: &Board,
    game: &GameState,
) -> bool {
    if !on_board(from) || !on_board(to) || from == to {
        return false;
    }
    // A friendly piece on the target square rejects the move before any
    // kind-specific logic runs.
    if let Some(target) = board.view(to) {
        if target.color == piece.color {
            return false;
        }
    }
    match piece.kind {
        PieceKind::Pawn => pawn_moves::pawn_move_is_valid(piece.color, from, to, board, game),
        PieceKind::Knight => knight_moves::knight_move_is_valid(from, to),
        PieceKind::Bishop => bishop_moves::bishop_move_is_valid(from, to, board),
        PieceKind::Rook => rook_moves::rook_move_is_valid(from, to, board),
        PieceKind::Queen => queen_moves::queen_move_is_valid(from, to, board),
        PieceKind::King => king_moves::king_move_is_valid(piece.color, from, to, board, game),
    }
}

/// Whether every square strictly between two aligned squares is empty.
/// Classic ray scan with a unit step per axis; callers check alignment.
pub fn ray_is_clear(board: &Board, from: &BoardLocation, to: &BoardLocation) -> bool {
    let step = ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    let mut current = (from.0 + step.0, from.1 + step.1);
    while current != *to {
        if board.view(&current).is_some() {
            return false;
        }
        current = (current.0 + step.0, current.1 + step.1);
    }
    true
}
