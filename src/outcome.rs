//! The persistence-facing boundary.
//!
//! The match service stores a status string (`ongoing | completed | draw`)
//! and a nullable winner next to the opaque JSON game-state blob; this
//! module produces values compatible with that row. Point arithmetic for
//! the scoring ledger stays with the caller: the engine only ever signals
//! "decisive, winner = X".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_end::GameStatus;
use crate::piece::Color;

/// Lifecycle of a match as the store models it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Ongoing,
    Completed,
    Draw,
}

impl MatchStatus {
    /// The exact string the match store persists.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Ongoing => "ongoing",
            MatchStatus::Completed => "completed",
            MatchStatus::Draw => "draw",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the engine reports back to the match service after a status query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub status: MatchStatus,
    /// Set exactly when `status` is `Completed`.
    pub winner: Option<Color>,
}

impl MatchOutcome {
    /// Collapses the engine's fine-grained status into the store's three
    /// states. `Check` is not terminal; every draw flavor maps to `Draw`.
    pub fn from_status(status: &GameStatus) -> Self {
        match status {
            GameStatus::Ongoing | GameStatus::Check => MatchOutcome {
                status: MatchStatus::Ongoing,
                winner: None,
            },
            GameStatus::Checkmate { winner } => MatchOutcome {
                status: MatchStatus::Completed,
                winner: Some(*winner),
            },
            GameStatus::Stalemate
            | GameStatus::DrawByMaterial
            | GameStatus::DrawByRepetition
            | GameStatus::DrawByFiftyMove => MatchOutcome {
                status: MatchStatus::Draw,
                winner: None,
            },
        }
    }

    /// Whether the match row should stop accepting moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.status, MatchStatus::Ongoing)
    }
}
