//! The move applier: turns a validated candidate into the next game state.

use crate::board_location::{on_board, BoardLocation};
use crate::chess_move::{CandidateMove, LastMove};
use crate::errors::ChessArbiterError;
use crate::game_state::GameState;
use crate::legality;
use crate::movement;
use crate::piece::{Color, Piece, PieceKind};

/// Applies a candidate move to a game, producing the next state.
///
/// The input state is never mutated; on success a superseding `GameState`
/// is returned with the piece moved, special moves resolved (en passant
/// victim removed, castling rook relocated, promotion applied), castling
/// rights and the en passant window updated, clocks advanced, the turn
/// flipped, and the move appended to the history.
///
/// # Arguments
/// * `game` - The current state snapshot.
/// * `candidate` - The proposed move; `promotion` is required exactly when
///   a pawn reaches the far rank.
///
/// # Returns
/// * `Ok(GameState)` - The next state.
/// * `Err(ChessArbiterError::GameAlreadyOver)` - The game reached checkmate,
///   stalemate, or a dead material position before this move. Claimable
///   draws never produce this error.
/// * `Err(ChessArbiterError::InvalidMove)` - Ownership, turn, geometry, or
///   obstruction failure.
/// * `Err(ChessArbiterError::SelfCheck)` - Geometrically fine but the
///   mover's own king would end up attacked.
/// * `Err(ChessArbiterError::InvalidPromotion)` - Missing or impossible
///   promotion choice.
pub fn apply_move(
    game: &GameState,
    candidate: &CandidateMove,
) -> Result<GameState, ChessArbiterError> {
    let from = candidate.from;
    let to = candidate.to;
    if !on_board(&from) {
        return Err(ChessArbiterError::MalformedState(from));
    }
    if !on_board(&to) {
        return Err(ChessArbiterError::MalformedState(to));
    }
    // Claimable draws (repetition, fifty-move) do not block play: the
    // caller decides whether to claim them off the status query.
    if crate::game_end::status(game).is_forced_terminal() {
        return Err(ChessArbiterError::GameAlreadyOver);
    }

    let piece = match game.board.view(&from) {
        Some(p) if p.color == game.turn => *p,
        _ => return Err(ChessArbiterError::InvalidMove { from, to }),
    };
    if !movement::is_geometrically_valid(&piece, &from, &to, &game.board, game) {
        return Err(ChessArbiterError::InvalidMove { from, to });
    }
    // Geometry passed, so a legality failure here is the king-safety filter.
    if !legality::is_legal_move(game, &from, &to) {
        return Err(ChessArbiterError::SelfCheck { from, to });
    }

    let d_col = to.1 - from.1;
    let is_pawn = piece.kind == PieceKind::Pawn;
    let is_double_push = is_pawn && (to.0 - from.0).abs() == 2;
    let is_en_passant = is_pawn
        && d_col != 0
        && game.board.view(&to).is_none()
        && game.en_passant_target == Some(to);
    let is_castling = piece.kind == PieceKind::King && d_col.abs() == 2;
    let is_promotion = is_pawn && to.0 == piece.color.promotion_row();

    let promoted_kind = if is_promotion {
        match candidate.promotion {
            Some(kind) if PieceKind::PROMOTION_KINDS.contains(&kind) => Some(kind),
            choice => {
                return Err(ChessArbiterError::InvalidPromotion { at: to, choice });
            }
        }
    } else {
        None
    };

    let mut next = game.clone();

    // Move the piece; the origin square is always cleared.
    next.board.take(&from);
    let captured = next.board.take(&to);
    let mut is_capture = captured.is_some();
    if is_en_passant {
        // The bypassed pawn sits beside the target square.
        next.board.take(&(from.0, to.1));
        is_capture = true;
    }
    let landed = match promoted_kind {
        Some(kind) => Piece::new(kind, piece.color),
        None => piece,
    };
    *next.board.at(&to) = Some(landed);

    if is_castling {
        relocate_castling_rook(&mut next, piece.color, d_col);
    }

    update_castling_rights(&mut next, &piece, &from, &to, &captured);

    // The en passant window lives for exactly one ply.
    next.en_passant_target = if is_double_push {
        Some(((from.0 + to.0) / 2, from.1))
    } else {
        None
    };

    // Fifty-move clock resets on any capture or pawn move.
    if is_pawn || is_capture {
        next.half_move_clock = 0;
    } else {
        next.half_move_clock += 1;
    }
    if piece.color == Color::Black {
        next.full_move_count += 1;
    }
    next.turn = piece.color.opposite();

    let record = LastMove {
        from,
        to,
        moved_kind: piece.kind,
        is_capture,
        is_double_push,
        is_en_passant,
        is_castling,
        is_promotion,
    };
    next.last_move = Some(record);
    next.history.push(record);
    let key = next.position_key();
    next.position_keys.push(key);

    Ok(next)
}

/// Moves the rook to its post-castle square. The king has already landed.
fn relocate_castling_rook(next: &mut GameState, color: Color, d_col: i8) {
    let back_row = color.back_row();
    let (rook_from, rook_to) = if d_col > 0 {
        ((back_row, 7), (back_row, 5))
    } else {
        ((back_row, 0), (back_row, 3))
    };
    let rook = next.board.take(&rook_from);
    *next.board.at(&rook_to) = rook;
}

/// Clears castling rights irrevocably: the first time a king moves, a rook
/// leaves its home square, or a rook is captured on its home square.
fn update_castling_rights(
    next: &mut GameState,
    piece: &Piece,
    from: &BoardLocation,
    to: &BoardLocation,
    captured: &Option<Piece>,
) {
    match piece.kind {
        PieceKind::King => {
            next.clear_kingside_rights(piece.color);
            next.clear_queenside_rights(piece.color);
        }
        PieceKind::Rook => {
            let back_row = piece.color.back_row();
            if *from == (back_row, 0) {
                next.clear_queenside_rights(piece.color);
            } else if *from == (back_row, 7) {
                next.clear_kingside_rights(piece.color);
            }
        }
        _ => (),
    }
    if let Some(victim) = captured {
        if victim.kind == PieceKind::Rook {
            let back_row = victim.color.back_row();
            if *to == (back_row, 0) {
                next.clear_queenside_rights(victim.color);
            } else if *to == (back_row, 7) {
                next.clear_kingside_rights(victim.color);
            }
        }
    }
}
