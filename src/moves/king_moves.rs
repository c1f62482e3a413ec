use crate::board::Board;
use crate::board_location::BoardLocation;
use crate::game_state::GameState;
use crate::piece::{Color, Piece, PieceKind};

/// Whether `from` -> `to` fits a single king step.
pub fn king_step_pattern(from: &BoardLocation, to: &BoardLocation) -> bool {
    let d_row = (to.0 - from.0).abs();
    let d_col = (to.1 - from.1).abs();
    d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
}

/// Whether a king move is geometrically valid.
///
/// A single step is always valid at this layer; whether it walks into check
/// is the legality filter's question. A two-square horizontal step is a
/// castling attempt: the rights flag must still be live, the rook must sit
/// on its home square, and the squares between king and rook must be empty.
/// Attack safety of the start, transit, and landing squares is enforced one
/// layer up.
pub fn king_move_is_valid(
    color: Color,
    from: &BoardLocation,
    to: &BoardLocation,
    board: &Board,
    game: &GameState,
) -> bool {
    if king_step_pattern(from, to) {
        return true;
    }
    let back_row = color.back_row();
    // Castling only ever starts from the king's home square.
    if *from != (back_row, 4) || to.0 != back_row {
        return false;
    }
    match to.1 - from.1 {
        2 => {
            game.can_castle_kingside(color)
                && rook_on_home_square(board, color, (back_row, 7))
                && board.view(&(back_row, 5)).is_none()
                && board.view(&(back_row, 6)).is_none()
        }
        -2 => {
            game.can_castle_queenside(color)
                && rook_on_home_square(board, color, (back_row, 0))
                && board.view(&(back_row, 1)).is_none()
                && board.view(&(back_row, 2)).is_none()
                && board.view(&(back_row, 3)).is_none()
        }
        _ => false,
    }
}

fn rook_on_home_square(board: &Board, color: Color, square: BoardLocation) -> bool {
    matches!(
        board.view(&square),
        Some(Piece {
            kind: PieceKind::Rook,
            color: c,
        }) if *c == color
    )
}
