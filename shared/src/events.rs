//! Inbound events: player moves and the table-level event union submitted to
//! the room supervisor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// A betting move. `Raise.amount` is the new per-round total the raiser is
/// betting to, not the increment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    Fold,
    Call,
    AllIn,
    Raise {
        amount: u32,
        /// Opaque observability payload carried through unmodified; the
        /// engine never interprets it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decision_context: Option<BTreeMap<String, String>>,
    },
}

impl Move {
    /// A raise without any decision context, for tests and internal use.
    pub fn raise(amount: u32) -> Self {
        Move::Raise {
            amount,
            decision_context: None,
        }
    }
}

/// Seat-level actions, valid only while the table is waiting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    Join,
    Leave,
}

/// Everything the supervisor accepts. `Start` and `AutoRestart` may come from
/// callers; `TransitionPhase`, `NextRound` and `EndGame` are internal and are
/// rejected when submitted externally.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Table {
        player_id: PlayerId,
        player_name: String,
        action: TableAction,
    },
    Move {
        player_id: PlayerId,
        #[serde(rename = "move")]
        action: Move,
    },
    Start,
    TransitionPhase,
    NextRound,
    EndGame,
    AutoRestart,
}

impl GameEvent {
    /// Convenience constructor for a join event.
    pub fn join(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        GameEvent::Table {
            player_id: id.into(),
            player_name: name.into(),
            action: TableAction::Join,
        }
    }

    /// Convenience constructor for a leave event.
    pub fn leave(id: impl Into<PlayerId>) -> Self {
        GameEvent::Table {
            player_id: id.into(),
            player_name: String::new(),
            action: TableAction::Leave,
        }
    }

    /// Convenience constructor for a move event.
    pub fn mv(id: impl Into<PlayerId>, action: Move) -> Self {
        GameEvent::Move {
            player_id: id.into(),
            action,
        }
    }

    /// Whether this event may only be produced by the supervisor itself.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            GameEvent::TransitionPhase | GameEvent::NextRound | GameEvent::EndGame
        )
    }
}
