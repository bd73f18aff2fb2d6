//! Player types and identifiers for the hold'em room engine.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Unique identifier for a player within a room. Opaque to the engine; callers
/// supply it on join and use it to address moves and views.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub String);

impl From<&str> for PlayerId {
    fn from(v: &str) -> Self {
        PlayerId(v.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(v: String) -> Self {
        PlayerId(v)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a seated player is currently doing in the hand.
///
/// `AllIn` holds exactly when the player has committed their whole stack this
/// round; `Eliminated` is terminal and excludes the player from dealing and
/// blind rotation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    Playing,
    Folded,
    AllIn,
    Eliminated,
}

/// Table position assigned at the start of each round. Players keep no
/// position outside a round (and eliminated players never get one).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "EP")]
    Early,
    #[serde(rename = "MP")]
    Middle,
    #[serde(rename = "CO")]
    Cutoff,
}

/// Chips a player has committed so far. `phase` is the contribution to the
/// current street and never exceeds `round`, the contribution to the whole
/// round.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    pub round: u32,
    pub phase: u32,
}

/// Full authoritative state of one seated player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub position: Option<Position>,
    /// Hole cards: empty outside a round, exactly two during one.
    pub hand: Vec<Card>,
    pub chips: u32,
    pub played_this_phase: bool,
    pub bet: Bet,
}

impl PlayerState {
    /// A freshly seated player with the configured starting stack.
    pub fn new(id: PlayerId, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id,
            name: name.into(),
            status: PlayerStatus::Playing,
            position: None,
            hand: Vec::new(),
            chips,
            played_this_phase: false,
            bet: Bet::default(),
        }
    }

    /// Whether this player was dealt into the current round and has not
    /// folded: they contest the pot at showdown.
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Playing | PlayerStatus::AllIn)
    }

    /// Whether this player can still act (not folded, not all-in, not out).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Playing
    }
}
