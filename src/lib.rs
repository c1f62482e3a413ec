//! Crate root module declarations for the chess_arbiter rules engine.
//!
//! This file exposes all top-level subsystems (board model, per-piece
//! movement geometry, the legality filter, the game-end detector, and the
//! move applier) so a surrounding match service, tests, and benches can
//! import stable module paths.

pub mod apply_move;
pub mod board;
pub mod board_location;
pub mod chess_move;
pub mod errors;
pub mod fen;
pub mod game_end;
pub mod game_state;
pub mod legality;
pub mod movement;
pub mod outcome;
pub mod piece;

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}
