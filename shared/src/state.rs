//! Authoritative table state: streets, round/phase bookkeeping, and the
//! `PokerState` snapshot published on every committed event.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::events::Move;
use crate::hand::HandResult;
use crate::player::{PlayerId, PlayerState, Position};

/// The current street of a round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Lifecycle of the table as a whole.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Waiting,
    Playing,
    RoundOver,
    GameOver,
}

/// Per-street bookkeeping, reset on every street transition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseState {
    pub street: Street,
    /// Moves processed this street.
    pub action_count: u32,
    /// Chips wagered this street.
    pub volume: u32,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            street: Street::PreFlop,
            action_count: 0,
            volume: 0,
        }
    }
}

/// Per-round bookkeeping. `current_bet` is the highest per-round total any
/// player must match to stay in; it is never reset between streets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    /// Monotonic from 1; 0 before the first deal.
    pub round_number: u32,
    /// Chips on the table for this round (the pot).
    pub volume: u32,
    pub current_bet: u32,
    /// Minimum increment the next raise must add on top of `current_bet`.
    pub min_raise: u32,
    pub folded_players: Vec<PlayerId>,
    pub all_in_players: Vec<PlayerId>,
}

/// Table parameters fixed at room construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub max_rounds: Option<u32>,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_players: usize,
    pub max_seats: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_rounds: None,
            starting_chips: 1000,
            small_blind: 10,
            big_blind: 20,
            min_players: 2,
            max_seats: 6,
        }
    }
}

/// The most recent move applied, kept for observers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveEvent {
    pub player_id: PlayerId,
    pub action: Move,
}

/// Outcome of a finished round: who won, what they split, and which hands
/// were revealed at a contested showdown.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub winner_ids: Vec<PlayerId>,
    pub pot: u32,
    pub hand_results: Vec<HandResult>,
}

/// Complete authoritative state of one table.
///
/// Published verbatim on the update stream after every committed event; the
/// per-player projection that hides hole cards is [`crate::PlayerView`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerState {
    pub table_id: String,
    pub table_status: TableStatus,
    /// Seat order is insertion order.
    pub players: Vec<PlayerState>,
    /// Seat index of the player to act; `None` when no one is to act.
    pub current_player_index: Option<usize>,
    /// Remaining cards; dealing pops from the end.
    pub deck: Vec<Card>,
    pub community: Vec<Card>,
    pub burnt: Vec<Card>,
    pub dealer_id: Option<PlayerId>,
    /// Set once the table reaches `GameOver`.
    pub winner: Option<PlayerId>,
    pub last_move: Option<MoveEvent>,
    pub last_round_result: Option<RoundResult>,
    pub round: RoundState,
    pub phase: PhaseState,
    pub config: TableConfig,
}

impl PokerState {
    pub fn new(table_id: impl Into<String>, config: TableConfig) -> Self {
        Self {
            table_id: table_id.into(),
            table_status: TableStatus::Waiting,
            players: Vec::new(),
            current_player_index: None,
            deck: Vec::new(),
            community: Vec::new(),
            burnt: Vec::new(),
            dealer_id: None,
            winner: None,
            last_move: None,
            last_round_result: None,
            round: RoundState::default(),
            phase: PhaseState::default(),
            config,
        }
    }

    /// Seat index of the given player, if seated.
    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// The player whose turn it is, if any.
    pub fn current_player(&self) -> Option<&PlayerState> {
        self.current_player_index.and_then(|i| self.players.get(i))
    }

    /// Seat index currently holding `position`, if assigned this round.
    pub fn seat_at(&self, position: Position) -> Option<usize> {
        self.players.iter().position(|p| p.position == Some(position))
    }

    /// Player id currently holding `position`, if assigned this round.
    pub fn id_at(&self, position: Position) -> Option<PlayerId> {
        self.seat_at(position).map(|i| self.players[i].id.clone())
    }

    /// Seat of the dealer for this round. In heads-up play the dealer holds
    /// the small blind rather than the button.
    pub fn dealer_seat(&self) -> Option<usize> {
        self.dealer_id.as_ref().and_then(|id| self.seat_of(id))
    }

    /// Seats of players that still have chips (not eliminated).
    pub fn funded_seats(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter_map(|(i, p)| (p.chips > 0).then_some(i))
            .collect()
    }

    /// Seats dealt into the current round that have not folded.
    pub fn in_hand_seats(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.in_hand().then_some(i))
            .collect()
    }

    /// The pot: chips committed to the current round.
    pub fn pot(&self) -> u32 {
        self.round.volume
    }
}
