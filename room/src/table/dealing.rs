//! Round setup: dealing, blind rotation and blind collection.

use rand::Rng;

use holdem_shared::{
    Bet, Card, PhaseState, PlayerStatus, PokerState, Position, RoomError, RoundState, TableStatus,
};

use super::betting::commit;
use super::flow::next_actor;
use crate::deck::shuffled_deck;

/// Pop the top card. Underflow means a reducer bug, never a user error.
pub(crate) fn draw(s: &mut PokerState) -> Result<Card, RoomError> {
    s.deck
        .pop()
        .ok_or_else(|| RoomError::inconsistent("deck underflow"))
}

/// Burn the top card into the burnt pile.
pub(crate) fn burn(s: &mut PokerState) -> Result<(), RoomError> {
    let c = draw(s)?;
    s.burnt.push(c);
    Ok(())
}

/// Start a new round: retire busted stacks, shuffle a fresh deck, deal two
/// hole cards per funded player in seat order, rotate and collect blinds, and
/// hand the action to the first pre-flop actor.
pub fn deal_cards<R: Rng + ?Sized>(
    state: PokerState,
    rng: &mut R,
) -> Result<PokerState, RoomError> {
    let mut s = state;
    match s.table_status {
        TableStatus::Waiting | TableStatus::RoundOver => {}
        TableStatus::Playing => return Err(RoomError::GameAlreadyStarted),
        TableStatus::GameOver => return Err(RoomError::TableLocked),
    }

    for p in &mut s.players {
        if p.chips == 0 {
            p.status = PlayerStatus::Eliminated;
            p.position = None;
            p.hand.clear();
            p.bet = Bet::default();
            p.played_this_phase = false;
        }
    }

    let funded = s.funded_seats();
    if funded.len() < s.config.min_players {
        return Err(RoomError::InsufficientPlayers);
    }

    s.round = RoundState {
        round_number: s.round.round_number + 1,
        volume: 0,
        current_bet: 0,
        min_raise: s.config.big_blind,
        folded_players: Vec::new(),
        all_in_players: Vec::new(),
    };
    s.phase = PhaseState::default();
    s.community.clear();
    s.burnt.clear();
    s.last_move = None;
    s.winner = None;
    s.deck = shuffled_deck(rng);

    for &i in &funded {
        let p = &mut s.players[i];
        p.status = PlayerStatus::Playing;
        p.position = None;
        p.hand.clear();
        p.bet = Bet::default();
        p.played_this_phase = false;
    }
    for _ in 0..2 {
        for &i in &funded {
            let c = draw(&mut s)?;
            s.players[i].hand.push(c);
        }
    }

    let s = rotate_blinds(s)?;
    let mut s = collect_blinds(s)?;

    // Pre-flop action starts left of the big blind; heads-up that is the
    // dealer, who posted the small blind.
    let bb = s
        .seat_at(Position::BigBlind)
        .ok_or_else(|| RoomError::inconsistent("no big blind assigned"))?;
    s.current_player_index = next_actor(&s, bb);
    s.table_status = TableStatus::Playing;
    Ok(s)
}

/// Move the dealer button forward over funded seats and hand out positions.
///
/// Heads-up the dealer takes the small blind; with three or more players the
/// dealer is the button, followed clockwise by SB, BB, and then EP/MP/CO as
/// seats remain.
pub fn rotate_blinds(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    let funded = s.funded_seats();
    if funded.len() < 2 {
        return Err(RoomError::InsufficientPlayers);
    }

    let dealer = match s.dealer_seat() {
        Some(prev) => funded
            .iter()
            .copied()
            .find(|&i| i > prev)
            .unwrap_or(funded[0]),
        None => funded[0],
    };
    let k = funded
        .iter()
        .position(|&i| i == dealer)
        .ok_or_else(|| RoomError::inconsistent("dealer seat not funded"))?;
    let order: Vec<usize> = funded[k..].iter().chain(funded[..k].iter()).copied().collect();

    for p in &mut s.players {
        p.position = None;
    }
    if order.len() == 2 {
        s.players[order[0]].position = Some(Position::SmallBlind);
        s.players[order[1]].position = Some(Position::BigBlind);
    } else {
        const SEATS: [Position; 6] = [
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::Early,
            Position::Middle,
            Position::Cutoff,
        ];
        for (&seat, &pos) in order.iter().zip(SEATS.iter()) {
            s.players[seat].position = Some(pos);
        }
    }
    s.dealer_id = Some(s.players[dealer].id.clone());
    Ok(s)
}

/// Post the blinds, capped to each poster's stack. A short poster goes
/// all-in for what they have; the nominal big blind remains the price to
/// stay in regardless.
pub fn collect_blinds(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    let sb = s
        .seat_at(Position::SmallBlind)
        .ok_or_else(|| RoomError::inconsistent("no small blind assigned"))?;
    let bb = s
        .seat_at(Position::BigBlind)
        .ok_or_else(|| RoomError::inconsistent("no big blind assigned"))?;

    let sb_amount = s.config.small_blind.min(s.players[sb].chips);
    commit(&mut s, sb, sb_amount);
    let bb_amount = s.config.big_blind.min(s.players[bb].chips);
    commit(&mut s, bb, bb_amount);

    s.round.current_bet = s.config.big_blind;
    s.round.min_raise = s.config.big_blind;
    Ok(s)
}
