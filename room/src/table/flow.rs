//! Turn order and street progression.

use holdem_shared::{PlayerState, PokerState, RoomError, Street, TableStatus};

use super::dealing::{burn, draw};

/// Whether a player still owes an action this street: they can act and have
/// either not acted yet or been raised past.
pub(crate) fn wants_action(p: &PlayerState, current_bet: u32) -> bool {
    p.can_act() && (!p.played_this_phase || p.bet.round < current_bet)
}

/// First seat clockwise after `from` satisfying `pred`, scanning each seat
/// once (including `from` itself, last).
pub(crate) fn next_seat<F>(state: &PokerState, from: usize, pred: F) -> Option<usize>
where
    F: Fn(&PlayerState) -> bool,
{
    let n = state.players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|k| (from + k) % n)
        .find(|&i| pred(&state.players[i]))
}

/// Seat of the next player owing an action, clockwise after `from`.
/// `None` means the betting round is closed.
pub(crate) fn next_actor(state: &PokerState, from: usize) -> Option<usize> {
    let bet = state.round.current_bet;
    next_seat(state, from, |p| wants_action(p, bet))
}

/// Advance the round one street.
///
/// Precondition: the current betting round is closed, or at most one
/// non-folded player remains. When only one player is left (or river betting
/// has finished) the street jumps to showdown without dealing further cards;
/// [`super::close_round`] then settles the pot.
pub fn transition_phase(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status != TableStatus::Playing {
        return Err(RoomError::inconsistent("phase transition outside an active round"));
    }

    let in_hand = s.in_hand_seats();
    if in_hand.len() <= 1 || s.phase.street == Street::River {
        s.phase.street = Street::Showdown;
        s.current_player_index = None;
        return Ok(s);
    }

    let next = match s.phase.street {
        Street::PreFlop => {
            burn(&mut s)?;
            for _ in 0..3 {
                let c = draw(&mut s)?;
                s.community.push(c);
            }
            Street::Flop
        }
        Street::Flop => {
            burn(&mut s)?;
            let c = draw(&mut s)?;
            s.community.push(c);
            Street::Turn
        }
        Street::Turn => {
            burn(&mut s)?;
            let c = draw(&mut s)?;
            s.community.push(c);
            Street::River
        }
        Street::River | Street::Showdown => {
            return Err(RoomError::inconsistent("no street past the river"));
        }
    };
    s.phase.street = next;

    // Per-street reset; the round-level bet and pot carry over.
    for &i in &in_hand {
        s.players[i].bet.phase = 0;
        s.players[i].played_this_phase = false;
    }
    s.phase.action_count = 0;
    s.phase.volume = 0;

    // With fewer than two players able to act there is no more betting:
    // leave no actor so the board runs out street by street.
    let actionable = s.players.iter().filter(|p| p.can_act()).count();
    if actionable < 2 {
        s.current_player_index = None;
        return Ok(s);
    }

    // Post-flop action starts left of the button (the big blind heads-up,
    // since the dealer holds the small blind there).
    let dealer = s
        .dealer_seat()
        .ok_or_else(|| RoomError::inconsistent("no dealer during an active round"))?;
    s.current_player_index = next_actor(&s, dealer);
    Ok(s)
}
