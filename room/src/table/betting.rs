//! Move processing: fold, call, raise and all-in semantics.

use holdem_shared::{
    IllegalMoveReason, Move, MoveEvent, PlayerId, PlayerStatus, PokerState, RoomError, TableStatus,
};

use super::flow::next_actor;

/// Move `pay` chips from a seat's stack into the pot, updating the per-round
/// and per-street contributions and flagging the seat all-in when its stack
/// empties.
pub(crate) fn commit(s: &mut PokerState, seat: usize, pay: u32) {
    {
        let p = &mut s.players[seat];
        p.chips -= pay;
        p.bet.round += pay;
        p.bet.phase += pay;
    }
    s.phase.volume += pay;
    s.round.volume += pay;

    let p = &s.players[seat];
    if p.chips == 0 && p.bet.round > 0 && p.status == PlayerStatus::Playing {
        let id = p.id.clone();
        s.players[seat].status = PlayerStatus::AllIn;
        if !s.round.all_in_players.contains(&id) {
            s.round.all_in_players.push(id);
        }
    }
}

/// Commit a seat's entire stack. If that exceeds the current bet it acts as
/// a raise and moves the price, but only a full-sized raise re-opens action
/// for players who already acted.
fn commit_all_in(s: &mut PokerState, seat: usize) {
    let pay = s.players[seat].chips;
    commit(s, seat, pay);

    let total = s.players[seat].bet.round;
    if total > s.round.current_bet {
        let delta = total - s.round.current_bet;
        if delta >= s.round.min_raise {
            s.round.min_raise = delta;
            reopen_action(s, seat, total);
        }
        s.round.current_bet = total;
    }
}

/// After a raise to `new_bet`, everyone behind who can still act owes another
/// decision this street.
fn reopen_action(s: &mut PokerState, actor: usize, new_bet: u32) {
    for (i, p) in s.players.iter_mut().enumerate() {
        if i != actor && p.can_act() && p.bet.round < new_bet {
            p.played_this_phase = false;
        }
    }
}

/// Apply one betting move for `player_id`.
///
/// `Raise.amount` is the new per-round total: it must exceed the current bet
/// by at least the minimum raise (the last raise delta, never below the big
/// blind) and fit the player's stack. A call that the stack cannot cover
/// becomes an all-in for less. After the move the turn passes to the next
/// seat owing an action; `current_player_index` becomes `None` when the
/// street's betting is closed.
pub fn process_move(
    state: PokerState,
    player_id: &PlayerId,
    action: Move,
) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status != TableStatus::Playing {
        return Err(RoomError::NotYourTurn);
    }
    let actor = match s.current_player_index {
        Some(i) if i < s.players.len() => i,
        _ => return Err(RoomError::NotYourTurn),
    };
    if s.players[actor].id != *player_id {
        return Err(RoomError::NotYourTurn);
    }
    if !s.players[actor].can_act() {
        return Err(RoomError::illegal(IllegalMoveReason::PlayerCannotAct));
    }

    match &action {
        Move::Fold => {
            let id = s.players[actor].id.clone();
            s.players[actor].status = PlayerStatus::Folded;
            s.round.folded_players.push(id);
        }
        Move::Call => {
            let owed = s.round.current_bet.saturating_sub(s.players[actor].bet.round);
            if owed >= s.players[actor].chips {
                commit_all_in(&mut s, actor);
            } else {
                commit(&mut s, actor, owed);
            }
        }
        Move::AllIn => commit_all_in(&mut s, actor),
        Move::Raise { amount, .. } => {
            let amount = *amount;
            if amount <= s.round.current_bet {
                return Err(RoomError::illegal(IllegalMoveReason::RaiseNotAboveCurrentBet));
            }
            let need = amount - s.players[actor].bet.round;
            if need > s.players[actor].chips {
                return Err(RoomError::illegal(IllegalMoveReason::InsufficientChips));
            }
            let delta = amount - s.round.current_bet;
            if delta < s.round.min_raise {
                return Err(RoomError::illegal(IllegalMoveReason::UndersizedRaise));
            }
            commit(&mut s, actor, need);
            s.round.min_raise = delta;
            reopen_action(&mut s, actor, amount);
            s.round.current_bet = amount;
        }
    }

    s.players[actor].played_this_phase = true;
    s.last_move = Some(MoveEvent {
        player_id: s.players[actor].id.clone(),
        action,
    });
    s.phase.action_count += 1;
    s.current_player_index = next_actor(&s, actor);
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::deal_cards;
    use holdem_shared::{PlayerState, TableConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playing_table(stacks: &[u32]) -> PokerState {
        let mut s = PokerState::new("t", TableConfig::default());
        for (i, &chips) in stacks.iter().enumerate() {
            s.players
                .push(PlayerState::new(format!("p{i}").into(), format!("P{i}"), chips));
        }
        let mut rng = StdRng::seed_from_u64(99);
        deal_cards(s, &mut rng).unwrap()
    }

    #[test]
    fn call_matches_the_current_bet() {
        let s = playing_table(&[500, 500]);
        // heads-up: p0 is dealer/SB and acts first, owing 10 more
        let s = process_move(s, &"p0".into(), Move::Call).unwrap();
        assert_eq!(s.players[0].bet.round, 20);
        assert_eq!(s.players[0].chips, 480);
        assert_eq!(s.round.volume, 40);
        assert_eq!(s.current_player_index, Some(1));
    }

    #[test]
    fn check_is_a_call_for_nothing() {
        let s = playing_table(&[500, 500]);
        let s = process_move(s, &"p0".into(), Move::Call).unwrap();
        // BB owes nothing; calling costs zero and closes the street
        let s = process_move(s, &"p1".into(), Move::Call).unwrap();
        assert_eq!(s.players[1].bet.round, 20);
        assert_eq!(s.round.volume, 40);
        assert_eq!(s.current_player_index, None);
    }

    #[test]
    fn out_of_turn_move_is_rejected_without_mutation() {
        let s = playing_table(&[500, 500]);
        let before = s.clone();
        let err = process_move(s.clone(), &"p1".into(), Move::Call).unwrap_err();
        assert_eq!(err, RoomError::NotYourTurn);
        assert_eq!(s, before);
    }

    #[test]
    fn raise_moves_price_and_reopens_action() {
        let s = playing_table(&[500, 500]);
        let s = process_move(s, &"p0".into(), Move::Call).unwrap();
        let s = process_move(s, &"p1".into(), Move::raise(60)).unwrap();
        assert_eq!(s.round.current_bet, 60);
        assert_eq!(s.round.min_raise, 40);
        // p0 already acted but was raised past: action re-opens
        assert!(!s.players[0].played_this_phase);
        assert_eq!(s.current_player_index, Some(0));
    }

    #[test]
    fn undersized_raise_is_rejected() {
        let s = playing_table(&[500, 500]);
        let s = process_move(s, &"p0".into(), Move::raise(100)).unwrap();
        assert_eq!(s.round.min_raise, 80);
        let err = process_move(s.clone(), &"p1".into(), Move::raise(120)).unwrap_err();
        assert_eq!(
            err,
            RoomError::illegal(IllegalMoveReason::UndersizedRaise)
        );
        // a full re-raise is fine
        let s2 = process_move(s, &"p1".into(), Move::raise(180)).unwrap();
        assert_eq!(s2.round.current_bet, 180);
    }

    #[test]
    fn raise_beyond_stack_is_rejected() {
        let s = playing_table(&[500, 500]);
        let err = process_move(s, &"p0".into(), Move::raise(600)).unwrap_err();
        assert_eq!(
            err,
            RoomError::illegal(IllegalMoveReason::InsufficientChips)
        );
    }

    #[test]
    fn short_call_becomes_all_in_for_less() {
        let s = playing_table(&[500, 500]);
        let s = process_move(s, &"p0".into(), Move::raise(450)).unwrap();
        let mut s = s;
        // shrink the caller's remaining stack below the price
        s.players[1].chips = 100;
        let s = process_move(s, &"p1".into(), Move::Call).unwrap();
        assert_eq!(s.players[1].chips, 0);
        assert_eq!(s.players[1].status, PlayerStatus::AllIn);
        assert_eq!(s.players[1].bet.round, 120);
        // the price did not move
        assert_eq!(s.round.current_bet, 450);
    }

    #[test]
    fn sub_minimum_all_in_moves_price_but_does_not_reopen() {
        let s = playing_table(&[500, 500, 500]);
        // seats: p0=BTN, p1=SB, p2=BB; first actor is p0
        let s = process_move(s, &"p0".into(), Move::Call).unwrap();
        let s = process_move(s, &"p1".into(), Move::Call).unwrap();
        let mut s = s;
        // give the big blind a tiny stack so its shove is a sub-minimum raise
        s.players[2].chips = 15;
        let s = process_move(s, &"p2".into(), Move::AllIn).unwrap();
        assert_eq!(s.round.current_bet, 35);
        // min raise unchanged: the shove added less than a full raise
        assert_eq!(s.round.min_raise, 20);
        assert_eq!(s.players[2].status, PlayerStatus::AllIn);
        // callers still owe the new price
        assert_eq!(s.current_player_index, Some(0));
    }

    #[test]
    fn fold_removes_player_from_contention() {
        let s = playing_table(&[500, 500, 500]);
        let s = process_move(s, &"p0".into(), Move::Fold).unwrap();
        assert_eq!(s.players[0].status, PlayerStatus::Folded);
        assert!(s.round.folded_players.contains(&"p0".into()));
        assert_eq!(s.current_player_index, Some(1));
    }
}
