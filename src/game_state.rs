use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::board_location::{offset_location, BoardLocation};
use crate::chess_move::LastMove;
use crate::fen;
use crate::piece::{Color, PieceKind};

/// Aggregate game state: board snapshot plus the bookkeeping the rules need.
///
/// Created at game start, superseded (never mutated in place) by each
/// successfully validated move. The whole aggregate serializes to the opaque
/// JSON `game_state` blob the match service persists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub can_castle_king_white: bool,
    pub can_castle_queen_white: bool,
    pub can_castle_king_black: bool,
    pub can_castle_queen_black: bool,
    /// Square a pawn skipped on the immediately preceding double push;
    /// live for exactly one ply.
    pub en_passant_target: Option<BoardLocation>,
    pub last_move: Option<LastMove>,
    /// Append-only; its length equals the ply count.
    pub history: Vec<LastMove>,
    /// Half-moves since the last capture or pawn move (fifty-move rule).
    pub half_move_clock: u16,
    pub full_move_count: u16,
    /// Canonical position key per position seen, including the initial one.
    /// Keys are compared for the threefold-repetition rule.
    pub position_keys: Vec<String>,
}

impl GameState {
    /// Castling-rights flag for one side of the board.
    pub fn can_castle_kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.can_castle_king_white,
            Color::Black => self.can_castle_king_black,
        }
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.can_castle_queen_white,
            Color::Black => self.can_castle_queen_black,
        }
    }

    /// Rights transitions are one-way: true to false, never back.
    pub fn clear_kingside_rights(&mut self, color: Color) {
        match color {
            Color::White => self.can_castle_king_white = false,
            Color::Black => self.can_castle_king_black = false,
        }
    }

    pub fn clear_queenside_rights(&mut self, color: Color) {
        match color {
            Color::White => self.can_castle_queen_white = false,
            Color::Black => self.can_castle_queen_black = false,
        }
    }

    /// Whether the side to move could actually capture onto the en passant
    /// target this ply. Used when building the position key, so two
    /// positions differing only by a dead en passant flag compare equal.
    pub fn en_passant_capture_available(&self) -> bool {
        let target = match self.en_passant_target {
            Some(x) => x,
            None => return false,
        };
        let direction = self.turn.forward_direction();
        for d_col in [-1, 1] {
            // Off-board neighbors happen on the rook files; skip them.
            let origin = match offset_location(&target, -direction, d_col) {
                Ok(x) => x,
                Err(_) => continue,
            };
            if let Some(piece) = self.board.view(&origin) {
                if piece.color == self.turn && piece.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
        false
    }

    /// Canonical repetition key: placement, side to move, castling rights,
    /// and the en passant target when a capture onto it is available.
    ///
    /// Keying on the position tuple (not on move notation) is what makes the
    /// threefold detector independent of the move order taken to reach a
    /// position.
    pub fn position_key(&self) -> String {
        let mut key = fen::render_placement(&self.board);
        key.push(' ');
        key.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });
        key.push(' ');
        key.push_str(&fen::render_castling(self));
        key.push(' ');
        if self.en_passant_capture_available() {
            if let Some(target) = self.en_passant_target {
                key.push_str(&crate::chess_move::square_to_string(&target));
            }
        } else {
            key.push('-');
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_passant_availability_needs_an_adjacent_pawn() -> Result<(), crate::errors::ChessArbiterError>
    {
        // Black just pushed d7d5; the white e5 pawn can capture onto d6.
        let with_pawn = GameState::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")?;
        assert!(with_pawn.en_passant_capture_available());

        // Same flag but no white pawn beside d5: the window is dead.
        let without_pawn = GameState::from_fen("rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 3")?;
        assert!(!without_pawn.en_passant_capture_available());

        // Dead flags must not leak into the repetition key.
        assert!(without_pawn.position_key().ends_with('-'));
        assert!(with_pawn.position_key().ends_with("d6"));
        Ok(())
    }

    #[test]
    fn en_passant_availability_on_the_rook_file() -> Result<(), crate::errors::ChessArbiterError>
    {
        // Black just pushed a7a5; only the b5 neighbor exists, the other
        // side of the target is off the board.
        let game = GameState::from_fen(
            "rnbqkbnr/1ppppppp/8/pP6/8/8/P1PPPPPP/RNBQKBNR w KQkq a6 0 3",
        )?;
        assert!(game.en_passant_capture_available());
        assert!(game.position_key().ends_with("a6"));
        Ok(())
    }

    #[test]
    fn position_key_ignores_clocks() -> Result<(), crate::errors::ChessArbiterError> {
        let early = GameState::from_fen("8/5k2/8/8/6K1/8/8/4q3 w - - 1 40")?;
        let late = GameState::from_fen("8/5k2/8/8/6K1/8/8/4q3 w - - 31 55")?;
        assert_eq!(early.position_key(), late.position_key());
        Ok(())
    }

    #[test]
    fn state_round_trips_through_the_json_blob() -> Result<(), crate::errors::ChessArbiterError>
    {
        // The match service stores the whole aggregate as one opaque value.
        let game = GameState::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")?;
        let blob = serde_json::to_string(&game).expect("game state must serialize");
        let restored: GameState = serde_json::from_str(&blob).expect("blob must deserialize");
        assert_eq!(restored, game);
        assert_eq!(restored.position_key(), game.position_key());
        Ok(())
    }
}
