//! The legality filter: geometry plus "does not leave my own king attacked".
//!
//! `is_square_attacked` is the shared primitive behind check detection,
//! castling-through-check prevention, and the mate/stalemate search. It is a
//! pure reachability probe over the geometry layer and never calls back into
//! `is_legal_move`; that one-way dependency is what keeps the
//! legality -> attack -> geometry chain from recursing.

use crate::board::Board;
use crate::board_location::{on_board, BoardLocation};
use crate::game_state::GameState;
use crate::movement;
use crate::moves::{bishop_moves, king_moves, knight_moves, pawn_moves, rook_moves};
use crate::piece::{Color, PieceKind};

/// Whether any piece of `attacker` geometrically reaches `square`.
///
/// Turn, self-check, castling, and en passant are all ignored: castling is
/// not an attack, and the pawn probe uses the bare diagonal pattern so an
/// empty square still counts as covered.
pub fn is_square_attacked(board: &Board, square: &BoardLocation, attacker: Color) -> bool {
    if !on_board(square) {
        return false;
    }
    for (location, piece) in board.iter() {
        if piece.color != attacker {
            continue;
        }
        let reaches = match piece.kind {
            PieceKind::Pawn => pawn_moves::pawn_attacks_square(attacker, &location, square),
            PieceKind::Knight => knight_moves::knight_move_is_valid(&location, square),
            PieceKind::Bishop => bishop_moves::bishop_move_is_valid(&location, square, board),
            PieceKind::Rook => rook_moves::rook_move_is_valid(&location, square, board),
            PieceKind::Queen => {
                rook_moves::rook_move_is_valid(&location, square, board)
                    || bishop_moves::bishop_move_is_valid(&location, square, board)
            }
            PieceKind::King => king_moves::king_step_pattern(&location, square),
        };
        if reaches {
            return true;
        }
    }
    false
}

/// Whether the given side's king is currently attacked. A board with no
/// such king reports "no check" (degraded but non-fatal).
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king_square) => is_square_attacked(board, &king_square, color.opposite()),
        None => false,
    }
}

/// Whether the side to move may play `from` -> `to`.
///
/// Runs the geometry check first and short-circuits on failure, then
/// simulates the move on a scratch copy of the board and requires the
/// mover's own king to be unattacked in the result. The input state is
/// never mutated.
pub fn is_legal_move(game: &GameState, from: &BoardLocation, to: &BoardLocation) -> bool {
    if !on_board(from) || !on_board(to) {
        return false;
    }
    let piece = match game.board.view(from) {
        Some(p) if p.color == game.turn => *p,
        _ => return false,
    };
    if !movement::is_geometrically_valid(&piece, from, to, &game.board, game) {
        return false;
    }

    // A castling king may not start in check or cross an attacked square;
    // the landing square is covered by the normal simulation below.
    if piece.kind == PieceKind::King && (to.1 - from.1).abs() == 2 {
        if is_king_in_check(&game.board, piece.color) {
            return false;
        }
        let transit = (from.0, (from.1 + to.1) / 2);
        let mut scratch = game.board.clone();
        scratch.take(from);
        *scratch.at(&transit) = Some(piece);
        if is_square_attacked(&scratch, &transit, piece.color.opposite()) {
            return false;
        }
    }

    let scratch = simulate_move(game, &piece.kind, from, to);
    let king_square = if piece.kind == PieceKind::King {
        Some(*to)
    } else {
        scratch.find_king(piece.color)
    };
    match king_square {
        Some(square) => !is_square_attacked(&scratch, &square, piece.color.opposite()),
        None => true,
    }
}

/// Plays the move on a fresh board copy: origin cleared, target overwritten,
/// en passant victim removed. Rook relocation for castling is irrelevant to
/// the mover's own king safety, so the simulation skips it.
fn simulate_move(
    game: &GameState,
    kind: &PieceKind,
    from: &BoardLocation,
    to: &BoardLocation,
) -> Board {
    let mut scratch = game.board.clone();
    let piece = scratch.take(from);
    if *kind == PieceKind::Pawn && from.1 != to.1 && game.en_passant_target == Some(*to) {
        // The bypassed pawn sits beside the target, on the mover's row.
        scratch.take(&(from.0, to.1));
    }
    *scratch.at(to) = piece;
    scratch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChessArbiterError;

    #[test]
    fn attack_probe_basics() -> Result<(), ChessArbiterError> {
        let game = GameState::from_fen("4k3/8/8/8/4r3/8/3P4/4K3 w - - 0 1")?;
        // The black rook on e4 covers the open e-file and rank 4.
        assert!(is_square_attacked(&game.board, &(4, 0), Color::Black));
        assert!(is_square_attacked(&game.board, &(1, 4), Color::Black));
        // The e-file ray reaches down to the white king's square.
        assert!(is_square_attacked(&game.board, &(7, 4), Color::Black));
        // The white d2 pawn covers c3 and e3 even though both are empty.
        assert!(is_square_attacked(&game.board, &(5, 2), Color::White));
        assert!(is_square_attacked(&game.board, &(5, 4), Color::White));
        assert!(!is_square_attacked(&game.board, &(5, 3), Color::White));
        Ok(())
    }

    #[test]
    fn check_detection() -> Result<(), ChessArbiterError> {
        let checked = GameState::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1")?;
        assert!(is_king_in_check(&checked.board, Color::White));
        assert!(!is_king_in_check(&checked.board, Color::Black));

        let kingless = GameState::from_fen("4k3/8/8/8/4r3/8/8/8 w - - 0 1")?;
        assert!(!is_king_in_check(&kingless.board, Color::White));
        Ok(())
    }

    #[test]
    fn pinned_piece_may_not_move() -> Result<(), ChessArbiterError> {
        // White bishop on e2 shields the e1 king from the e4 rook.
        let game = GameState::from_fen("4k3/8/8/8/4r3/8/4B3/4K3 w - - 0 1")?;
        assert!(!is_legal_move(&game, &(6, 4), &(5, 3)));
        assert!(!is_legal_move(&game, &(6, 4), &(4, 2)));
        // Moving along the pin is fine: the bishop cannot, but the king can
        // step aside.
        assert!(is_legal_move(&game, &(7, 4), &(7, 3)));
        // Stepping up the e-file stays in the rook's fire.
        assert!(!is_legal_move(&game, &(7, 4), &(6, 4)));
        Ok(())
    }

    #[test]
    fn turn_ownership_enforced() -> Result<(), ChessArbiterError> {
        let game = GameState::new_game();
        // Black may not move while it is white's turn.
        assert!(!is_legal_move(&game, &(1, 4), &(3, 4)));
        // Empty origin fails closed.
        assert!(!is_legal_move(&game, &(4, 4), &(3, 4)));
        assert!(is_legal_move(&game, &(6, 4), &(4, 4)));
        Ok(())
    }

    #[test]
    fn castling_through_or_out_of_check_rejected() -> Result<(), ChessArbiterError> {
        // Black rook on f4 covers f1: the king would cross an attacked square.
        let through = GameState::from_fen("4k3/8/8/8/5r2/8/8/R3K2R w KQ - 0 1")?;
        assert!(!is_legal_move(&through, &(7, 4), &(7, 6)));
        // Queenside transit (d1) is not covered by the f4 rook.
        assert!(is_legal_move(&through, &(7, 4), &(7, 2)));

        // Rook on e4 gives check: no castling either way.
        let out_of = GameState::from_fen("4k3/8/8/8/4r3/8/8/R3K2R w KQ - 0 1")?;
        assert!(!is_legal_move(&out_of, &(7, 4), &(7, 6)));
        assert!(!is_legal_move(&out_of, &(7, 4), &(7, 2)));

        // Rook on g4 covers the landing square g1.
        let landing = GameState::from_fen("4k3/8/8/8/6r1/8/8/R3K2R w KQ - 0 1")?;
        assert!(!is_legal_move(&landing, &(7, 4), &(7, 6)));
        assert!(is_legal_move(&landing, &(7, 4), &(7, 2)));
        Ok(())
    }

    #[test]
    fn en_passant_simulation_removes_the_victim() -> Result<(), ChessArbiterError> {
        // After the capture the mover's king on e5's row is exposed to the
        // h5 rook only if the captured pawn really leaves the board.
        let game = GameState::from_fen("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 2")?;
        // exd6 en passant removes the d5 pawn; the a5 king then stands in
        // the h5 rook's line, so the capture must be rejected.
        assert!(!is_legal_move(&game, &(3, 4), &(2, 3)));
        Ok(())
    }
}
