//! Seat-level reducers: join, leave, restart and forced game end.

use holdem_shared::{
    Bet, PhaseState, PlayerId, PlayerState, PlayerStatus, PokerState, RoomError, RoundState,
    TableStatus,
};

use super::showdown::chip_leader;

/// Seat a new player while the table is waiting.
pub fn join_table(
    state: PokerState,
    player_id: &PlayerId,
    name: &str,
) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status != TableStatus::Waiting {
        return Err(RoomError::TableLocked);
    }
    if s.players.len() >= s.config.max_seats {
        return Err(RoomError::TableLocked);
    }
    if s.seat_of(player_id).is_some() {
        return Err(RoomError::inconsistent(format!(
            "player {player_id} already seated"
        )));
    }
    s.players.push(PlayerState::new(
        player_id.clone(),
        name,
        s.config.starting_chips,
    ));
    Ok(s)
}

/// Remove a seated player: freely while the table is waiting, or as a
/// forfeit between rounds. The round is already settled at `RoundOver`, so a
/// forfeiter simply walks away with their stack; if that leaves fewer than
/// two funded seats the game ends on the spot.
pub fn leave_table(state: PokerState, player_id: &PlayerId) -> Result<PokerState, RoomError> {
    let mut s = state;
    match s.table_status {
        TableStatus::Waiting | TableStatus::RoundOver => {}
        _ => return Err(RoomError::TableLocked),
    }
    let seat = s
        .seat_of(player_id)
        .ok_or_else(|| RoomError::inconsistent(format!("player {player_id} is not seated")))?;
    s.players.remove(seat);

    if s.table_status == TableStatus::RoundOver && s.funded_seats().len() <= 1 {
        s.table_status = TableStatus::GameOver;
        s.winner = chip_leader(&s);
        s.current_player_index = None;
    }
    Ok(s)
}

/// Reset a finished game back to a waiting table: every player is re-seated
/// with the starting stack and the round counter starts over.
pub fn restart_table(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status != TableStatus::GameOver {
        return Err(RoomError::GameNotOver);
    }
    for p in &mut s.players {
        p.chips = s.config.starting_chips;
        p.status = PlayerStatus::Playing;
        p.position = None;
        p.hand.clear();
        p.bet = Bet::default();
        p.played_this_phase = false;
    }
    s.table_status = TableStatus::Waiting;
    s.round = RoundState::default();
    s.phase = PhaseState::default();
    s.deck.clear();
    s.community.clear();
    s.burnt.clear();
    s.dealer_id = None;
    s.winner = None;
    s.last_move = None;
    s.last_round_result = None;
    s.current_player_index = None;
    Ok(s)
}

/// Force the game over. Outstanding round bets are returned to their owners
/// so chips stay conserved; the chip leader is recorded as the winner.
pub fn end_game(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status == TableStatus::GameOver {
        return Ok(s);
    }
    for p in &mut s.players {
        p.chips += p.bet.round;
        p.bet = Bet::default();
        p.hand.clear();
        p.position = None;
        p.played_this_phase = false;
    }
    s.round.volume = 0;
    s.deck.clear();
    s.community.clear();
    s.burnt.clear();
    s.current_player_index = None;
    s.table_status = TableStatus::GameOver;
    s.winner = chip_leader(&s);
    Ok(s)
}
