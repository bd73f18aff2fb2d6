//! Client-server protocol: per-player views and the message surface shared
//! by the WebSocket and HTTP transports.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::RoomError;
use crate::events::GameEvent;
use crate::player::{Bet, PlayerId, PlayerState, PlayerStatus};
use crate::state::{PhaseState, PokerState, RoundState, TableStatus};

/// What one player is allowed to see about an opponent. `hand` stays empty
/// unless that opponent's cards were revealed at a contested showdown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpponentView {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub chips: u32,
    pub bet: Bet,
    #[serde(default)]
    pub hand: Vec<Card>,
}

/// Projection of the table for a single player: their own cards and state in
/// full, opponents reduced to public information.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub player: PlayerState,
    pub table_status: TableStatus,
    pub current_player_id: Option<PlayerId>,
    pub dealer_id: Option<PlayerId>,
    pub small_blind_id: Option<PlayerId>,
    pub big_blind_id: Option<PlayerId>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub phase: PhaseState,
    pub round: RoundState,
    pub opponents: Vec<OpponentView>,
}

/// Messages that clients can send to the room server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMsg {
    /// Request the current authoritative snapshot.
    CurrentState,
    /// Start the game (equivalent to submitting `GameEvent::Start`).
    StartGame,
    /// Submit any game event.
    Event(GameEvent),
    /// Request the view projected for one player.
    PlayerView { player_id: PlayerId },
}

/// Messages the room server sends back.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMsg {
    State(PokerState),
    View(PlayerView),
    Error(RoomError),
}
