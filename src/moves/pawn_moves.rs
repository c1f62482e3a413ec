use crate::board::Board;
use crate::board_location::BoardLocation;
use crate::game_state::GameState;
use crate::piece::Color;

/// Whether a pawn of the given color may move `from` -> `to`.
///
/// Covers the single push, the double push from the home row (intermediate
/// square must be empty), the diagonal capture, and the en passant capture
/// onto the live target square. The captured pawn of an en passant sits
/// beside the target, not on it; removing it is the applier's job.
pub fn pawn_move_is_valid(
    color: Color,
    from: &BoardLocation,
    to: &BoardLocation,
    board: &Board,
    game: &GameState,
) -> bool {
    let d_row = to.0 - from.0;
    let d_col = to.1 - from.1;
    let direction = color.forward_direction();
    let target_occupied = board.view(to).is_some();

    // Forward march: blocked by any piece, including an enemy.
    if d_col == 0 && d_row == direction && !target_occupied {
        return true;
    }

    // Double step off the home row; cannot jump over a piece.
    if d_col == 0
        && d_row == 2 * direction
        && from.0 == color.pawn_home_row()
        && !target_occupied
    {
        let intermediate = (from.0 + direction, from.1);
        return board.view(&intermediate).is_none();
    }

    // Diagonal step: a capture, or the en passant window.
    if d_col.abs() == 1 && d_row == direction {
        if target_occupied {
            // Same-color targets were rejected by the dispatch layer.
            return true;
        }
        return game.en_passant_target == Some(*to);
    }

    false
}

/// Whether a pawn of this color standing at `from` attacks `square`.
///
/// Pure diagonal reachability for the attack probe: unlike
/// `pawn_move_is_valid` it does not require the square to be occupied, so
/// empty castling-transit squares are still seen as covered.
pub fn pawn_attacks_square(color: Color, from: &BoardLocation, square: &BoardLocation) -> bool {
    square.0 - from.0 == color.forward_direction() && (square.1 - from.1).abs() == 1
}
