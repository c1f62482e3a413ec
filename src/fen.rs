//! FEN-style fixture parsing and rendering.
//!
//! A full PGN/FEN product surface is out of scope; this module exists so
//! test positions and the standard start position can be written as strings,
//! and so the repetition key can reuse the placement/castling renderers.

use crate::board::Board;
use crate::board_location::BoardLocation;
use crate::chess_move::{parse_square, square_to_string};
use crate::errors::ChessArbiterError;
use crate::game_state::GameState;
use crate::piece::{Color, Piece};

/// The standard initial position.
pub const NEW_GAME_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl GameState {
    /// A fresh game: standard placement, white to move, full castling
    /// rights, no en passant target, empty history.
    pub fn new_game() -> Self {
        GameState::from_fen(NEW_GAME_FEN).expect("the start position string must parse")
    }

    /// Builds a game state from the six FEN fields.
    ///
    /// # Arguments
    /// * `x` - Placement, turn, castling, en passant, half-move clock, and
    ///   full-move count, space separated.
    ///
    /// # Returns
    /// * `Ok(GameState)` with the history empty and the position key seeded.
    /// * `Err(ChessArbiterError::InvalidFenString)` on any malformed field.
    pub fn from_fen(x: &str) -> Result<Self, ChessArbiterError> {
        let invalid = || ChessArbiterError::InvalidFenString(x.to_string());
        let mut fields = x.split_ascii_whitespace();

        let board = parse_placement(fields.next().ok_or_else(invalid)?, x)?;

        let turn = match fields.next().ok_or_else(invalid)? {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid()),
        };

        let castle_field = fields.next().ok_or_else(invalid)?;
        let mut can_castle_king_white = false;
        let mut can_castle_queen_white = false;
        let mut can_castle_king_black = false;
        let mut can_castle_queen_black = false;
        for c in castle_field.chars() {
            match c {
                'K' => can_castle_king_white = true,
                'Q' => can_castle_queen_white = true,
                'k' => can_castle_king_black = true,
                'q' => can_castle_queen_black = true,
                '-' => (),
                _ => return Err(invalid()),
            }
        }

        let en_passant_field = fields.next().ok_or_else(invalid)?;
        let en_passant_target = if en_passant_field == "-" {
            None
        } else {
            let bytes = en_passant_field.as_bytes();
            if bytes.len() != 2 {
                return Err(invalid());
            }
            Some(parse_square(bytes[0] as char, bytes[1] as char).ok_or_else(invalid)?)
        };

        let half_move_clock: u16 = fields
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let full_move_count: u16 = fields
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;

        let mut game = GameState {
            board,
            turn,
            can_castle_king_white,
            can_castle_queen_white,
            can_castle_king_black,
            can_castle_queen_black,
            en_passant_target,
            last_move: None,
            history: Vec::new(),
            half_move_clock,
            full_move_count,
            position_keys: Vec::new(),
        };
        game.position_keys.push(game.position_key());
        Ok(game)
    }

    /// Renders the position back to its six FEN fields.
    pub fn get_fen(&self) -> String {
        let mut result = render_placement(&self.board);
        result.push(' ');
        result.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });
        result.push(' ');
        result.push_str(&render_castling(self));
        result.push(' ');
        match &self.en_passant_target {
            Some(target) => result.push_str(&square_to_string(target)),
            None => result.push('-'),
        }
        result.push(' ');
        result.push_str(&self.half_move_clock.to_string());
        result.push(' ');
        result.push_str(&self.full_move_count.to_string());
        result
    }
}

fn parse_placement(field: &str, whole: &str) -> Result<Board, ChessArbiterError> {
    let invalid = || ChessArbiterError::InvalidFenString(whole.to_string());
    let mut board = Board::default();
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid());
    }
    // FEN lists ranks top-down, which matches row order directly.
    for (row, row_field) in rows.iter().enumerate() {
        let mut col: i8 = 0;
        for c in row_field.chars() {
            match c {
                '1'..='8' => col += c as i8 - '0' as i8,
                _ => {
                    let piece = Piece::from_char(c).ok_or_else(invalid)?;
                    if col > 7 {
                        return Err(invalid());
                    }
                    board
                        .place(piece, (row as i8, col))
                        .map_err(|_| invalid())?;
                    col += 1;
                }
            }
        }
        if col != 8 {
            return Err(invalid());
        }
    }
    Ok(board)
}

/// Renders only the placement field; shared with the repetition key.
pub fn render_placement(board: &Board) -> String {
    let mut result = String::new();
    for row in 0..8 {
        let mut empty_run: u8 = 0;
        for col in 0..8 {
            let loc: BoardLocation = (row, col);
            match board.view(&loc) {
                Some(piece) => {
                    if empty_run > 0 {
                        result.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    result.push(piece.kind.to_char(piece.color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            result.push((b'0' + empty_run) as char);
        }
        if row < 7 {
            result.push('/');
        }
    }
    result
}

/// Renders the castling-rights field; shared with the repetition key.
pub fn render_castling(game: &GameState) -> String {
    let mut result = String::new();
    if game.can_castle_king_white {
        result.push('K');
    }
    if game.can_castle_queen_white {
        result.push('Q');
    }
    if game.can_castle_king_black {
        result.push('k');
    }
    if game.can_castle_queen_black {
        result.push('q');
    }
    if result.is_empty() {
        result.push('-');
    }
    result
}
