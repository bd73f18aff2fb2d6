//! Typed failures surfaced by the room engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raise or other move was refused.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IllegalMoveReason {
    /// Raise target does not exceed the current bet.
    RaiseNotAboveCurrentBet,
    /// Raise increment is below the minimum (last raise delta or big blind).
    UndersizedRaise,
    /// The move would require more chips than the player has.
    InsufficientChips,
    /// The player is folded or all-in and cannot act.
    PlayerCannotAct,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IllegalMoveReason::RaiseNotAboveCurrentBet => "raise_not_above_current_bet",
            IllegalMoveReason::UndersizedRaise => "undersized_raise",
            IllegalMoveReason::InsufficientChips => "insufficient_chips",
            IllegalMoveReason::PlayerCannotAct => "player_cannot_act",
        };
        f.write_str(s)
    }
}

/// The error taxonomy of the room surface. User-correctable variants leave
/// the state untouched and emit nothing on the update stream;
/// `InconsistentState` marks the room corrupt until it is reset.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomError {
    #[error("not your turn")]
    NotYourTurn,
    #[error("table is locked")]
    TableLocked,
    #[error("game already started")]
    GameAlreadyStarted,
    #[error("not enough players to start")]
    InsufficientPlayers,
    #[error("game is not over")]
    GameNotOver,
    #[error("inconsistent state: {message}")]
    InconsistentState { message: String },
    #[error("illegal move: {reason}")]
    IllegalMove { reason: IllegalMoveReason },
}

impl RoomError {
    pub fn inconsistent(message: impl Into<String>) -> Self {
        RoomError::InconsistentState {
            message: message.into(),
        }
    }

    pub fn illegal(reason: IllegalMoveReason) -> Self {
        RoomError::IllegalMove { reason }
    }
}
