//! Per-player projections of the authoritative state.
//!
//! A view carries the viewer's own cards and state in full; opponents are
//! reduced to public information. Opponent hole cards only ever appear after
//! a contested showdown revealed them, via the recorded round result.

use holdem_shared::{
    Card, OpponentView, PlayerId, PlayerView, PokerState, Position, RoomError, TableStatus,
};

/// Build the view for `player_id`. Fails if the player is not seated.
pub fn project(state: &PokerState, player_id: &PlayerId) -> Result<PlayerView, RoomError> {
    let seat = state
        .seat_of(player_id)
        .ok_or_else(|| RoomError::inconsistent(format!("unknown player {player_id}")))?;
    let me = &state.players[seat];

    // Hands revealed by the round that just closed stay visible until the
    // next deal wipes the result's relevance.
    let reveal = matches!(
        state.table_status,
        TableStatus::RoundOver | TableStatus::GameOver
    );
    let revealed_hole = |id: &PlayerId| -> Vec<Card> {
        if !reveal {
            return Vec::new();
        }
        state
            .last_round_result
            .as_ref()
            .and_then(|r| r.hand_results.iter().find(|h| &h.player_id == id))
            .map(|h| h.hole.clone())
            .unwrap_or_default()
    };

    let opponents = state
        .players
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != seat)
        .map(|(_, p)| OpponentView {
            id: p.id.clone(),
            name: p.name.clone(),
            status: p.status,
            chips: p.chips,
            bet: p.bet,
            hand: revealed_hole(&p.id),
        })
        .collect();

    Ok(PlayerView {
        player_id: me.id.clone(),
        hand: me.hand.clone(),
        player: me.clone(),
        table_status: state.table_status,
        current_player_id: state.current_player().map(|p| p.id.clone()),
        dealer_id: state.dealer_id.clone(),
        small_blind_id: state.id_at(Position::SmallBlind),
        big_blind_id: state.id_at(Position::BigBlind),
        community: state.community.clone(),
        pot: state.pot(),
        phase: state.phase.clone(),
        round: state.round.clone(),
        opponents,
    })
}
