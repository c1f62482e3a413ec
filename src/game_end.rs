//! The game-end detector: a pure status query over board plus history.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::legality::{is_king_in_check, is_legal_move};
use crate::piece::{Color, PieceKind};

/// The answer to a status query. Idempotent and side-effect free: repeated
/// calls on the same snapshot return the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a reply.
    Check,
    Checkmate { winner: Color },
    Stalemate,
    DrawByMaterial,
    /// Claimable: the same position occurred three times.
    DrawByRepetition,
    /// Claimable: a hundred half-moves without a capture or pawn move.
    DrawByFiftyMove,
}

impl GameStatus {
    /// Whether the position ends the game on its own. Repetition and
    /// fifty-move draws are claimable: whether to end the game is the
    /// caller's decision, so the applier keeps accepting legal moves.
    pub fn is_forced_terminal(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::DrawByMaterial
        )
    }
}

/// Classifies the game. Mate and stalemate are decided first; the draw
/// rules follow in material, repetition, fifty-move order.
pub fn status(game: &GameState) -> GameStatus {
    let in_check = is_king_in_check(&game.board, game.turn);
    let has_reply = has_any_legal_move(game);
    if !has_reply {
        return if in_check {
            GameStatus::Checkmate {
                winner: game.turn.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if insufficient_material(game) {
        return GameStatus::DrawByMaterial;
    }
    if repetition_count(game) >= 3 {
        return GameStatus::DrawByRepetition;
    }
    if game.half_move_clock >= 100 {
        return GameStatus::DrawByFiftyMove;
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

/// Whether the side to move has any legal move at all.
///
/// Exhaustive scan: every friendly piece against every target square,
/// first legal hit short-circuits. Bounded at pieces x 64 legality checks;
/// no pruning is needed at this scale.
pub fn has_any_legal_move(game: &GameState) -> bool {
    for (location, piece) in game.board.iter() {
        if piece.color != game.turn {
            continue;
        }
        for row in 0..8 {
            for col in 0..8 {
                if is_legal_move(game, &location, &(row, col)) {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether neither side can force mate: king versus king, or a lone bishop
/// or knight against a bare king, in either direction.
fn insufficient_material(game: &GameState) -> bool {
    let mut extras: Vec<PieceKind> = Vec::new();
    for (_, piece) in game.board.iter() {
        if piece.kind != PieceKind::King {
            extras.push(piece.kind);
        }
        if extras.len() > 1 {
            return false;
        }
    }
    match extras.as_slice() {
        [] => true,
        [kind] => matches!(kind, PieceKind::Bishop | PieceKind::Knight),
        _ => false,
    }
}

/// How many times the current position has occurred, counting itself.
/// Keys are the canonical position tuple, not move notation, so the count
/// is independent of the move order that reached the position.
fn repetition_count(game: &GameState) -> usize {
    let current = match game.position_keys.last() {
        Some(key) => key,
        None => return 0,
    };
    game.position_keys.iter().filter(|key| *key == current).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_move::apply_move;
    use crate::chess_move::CandidateMove;
    use crate::errors::ChessArbiterError;

    fn play(game: GameState, moves: &str) -> Result<GameState, ChessArbiterError> {
        let mut game = game;
        for token in moves.split_ascii_whitespace() {
            let candidate = CandidateMove::from_long_algebraic(token)?;
            game = apply_move(&game, &candidate)?;
        }
        Ok(game)
    }

    #[test]
    fn fresh_game_is_ongoing() {
        assert_eq!(status(&GameState::new_game()), GameStatus::Ongoing);
    }

    #[test]
    fn check_without_mate_is_reported() -> Result<(), ChessArbiterError> {
        // Rook gives check; the king can step aside.
        let game = GameState::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1")?;
        assert_eq!(status(&game), GameStatus::Check);
        Ok(())
    }

    #[test]
    fn back_rank_mate_is_checkmate_for_black() -> Result<(), ChessArbiterError> {
        // White king cornered on g1; black queen e1 and rook f2 cover every
        // escape, block, and capture.
        let game = GameState::from_fen("8/8/8/8/8/8/5r2/4q1K1 w - - 0 1")?;
        assert_eq!(
            status(&game),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        Ok(())
    }

    #[test]
    fn scholars_mate_is_checkmate_for_white() -> Result<(), ChessArbiterError> {
        let game = play(
            GameState::new_game(),
            "e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7",
        )?;
        assert_eq!(
            status(&game),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        Ok(())
    }

    #[test]
    fn cornered_king_without_check_is_stalemate() -> Result<(), ChessArbiterError> {
        // Classic king-versus-king-and-queen bind: black to move, not in
        // check, zero legal moves.
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")?;
        assert_eq!(status(&game), GameStatus::Stalemate);
        Ok(())
    }

    #[test]
    fn lone_minor_piece_is_a_material_draw() -> Result<(), ChessArbiterError> {
        let knight = GameState::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1")?;
        assert_eq!(status(&knight), GameStatus::DrawByMaterial);

        let bishop = GameState::from_fen("4k3/8/8/8/8/8/8/4KB2 b - - 0 1")?;
        assert_eq!(status(&bishop), GameStatus::DrawByMaterial);

        let bare_kings = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1")?;
        assert_eq!(status(&bare_kings), GameStatus::DrawByMaterial);

        // A rook can still force mate.
        let rook = GameState::from_fen("4k3/8/8/8/8/8/8/4KR2 w - - 0 1")?;
        assert_eq!(status(&rook), GameStatus::Ongoing);
        Ok(())
    }

    #[test]
    fn knight_shuffle_reaches_threefold_repetition() -> Result<(), ChessArbiterError> {
        // The start position recurs after every four knight moves; the
        // third occurrence arrives after eight plies.
        let shuffle = "g1f3 g8f6 f3g1 f6g8";
        let twice = play(GameState::new_game(), &format!("{} ", shuffle).repeat(2))?;
        assert_eq!(status(&twice), GameStatus::DrawByRepetition);

        let once = play(GameState::new_game(), shuffle)?;
        assert_eq!(status(&once), GameStatus::Ongoing);
        Ok(())
    }

    #[test]
    fn fifty_move_clock_draws_at_a_hundred_half_moves() -> Result<(), ChessArbiterError> {
        let game = GameState::from_fen("4k3/7p/8/8/8/8/8/4K2R w - - 100 80")?;
        assert_eq!(status(&game), GameStatus::DrawByFiftyMove);

        let almost = GameState::from_fen("4k3/7p/8/8/8/8/8/4K2R w - - 99 80")?;
        assert_eq!(status(&almost), GameStatus::Ongoing);
        Ok(())
    }

    #[test]
    fn only_decided_positions_force_the_game_closed() {
        assert!(GameStatus::Checkmate {
            winner: Color::White
        }
        .is_forced_terminal());
        assert!(GameStatus::Stalemate.is_forced_terminal());
        assert!(GameStatus::DrawByMaterial.is_forced_terminal());
        assert!(!GameStatus::DrawByRepetition.is_forced_terminal());
        assert!(!GameStatus::DrawByFiftyMove.is_forced_terminal());
        assert!(!GameStatus::Check.is_forced_terminal());
        assert!(!GameStatus::Ongoing.is_forced_terminal());
    }

    #[test]
    fn status_queries_are_idempotent() -> Result<(), ChessArbiterError> {
        let game = GameState::from_fen("8/8/8/8/8/8/5r2/4q1K1 w - - 0 1")?;
        let snapshot = game.clone();
        let first = status(&game);
        let second = status(&game);
        assert_eq!(first, second);
        assert_eq!(game, snapshot);
        Ok(())
    }
}
