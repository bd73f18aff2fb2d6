//! Post-commit audits of the engine's structural invariants. A failure here
//! is a reducer bug; the supervisor flags the room corrupt and refuses
//! further events.

use std::collections::HashSet;

use holdem_shared::{Card, PokerState, TableStatus};

use super::flow::wants_action;

/// Card and turn-order invariants. Only meaningful while a round is live:
/// outside of one the cards have been torn down.
pub fn audit(state: &PokerState) -> Result<(), String> {
    if state.table_status != TableStatus::Playing {
        return Ok(());
    }

    // Deck, board, burnt pile and every hand together form the 52-card deck.
    let mut seen: HashSet<Card> = HashSet::new();
    let mut count = 0usize;
    let all = state
        .deck
        .iter()
        .chain(&state.community)
        .chain(&state.burnt)
        .chain(state.players.iter().flat_map(|p| &p.hand));
    for &c in all {
        if !seen.insert(c) {
            return Err(format!("duplicate card on table: {c}"));
        }
        count += 1;
    }
    if count != 52 {
        return Err(format!("card count {count} != 52"));
    }

    let max_round_bet = state.players.iter().map(|p| p.bet.round).max().unwrap_or(0);
    if state.round.current_bet < max_round_bet {
        return Err(format!(
            "current bet {} below highest contribution {}",
            state.round.current_bet, max_round_bet
        ));
    }
    for p in &state.players {
        if p.bet.phase > p.bet.round {
            return Err(format!("{}: street bet exceeds round bet", p.id));
        }
    }

    if let Some(i) = state.current_player_index {
        let p = state
            .players
            .get(i)
            .ok_or_else(|| format!("actor index {i} out of range"))?;
        if !wants_action(p, state.round.current_bet) {
            return Err(format!("{}: marked to act but owes no action", p.id));
        }
    }
    Ok(())
}

/// Chip conservation: stacks plus the pot must equal the total captured when
/// the player set last changed.
pub fn audit_chips(state: &PokerState, baseline: u64) -> Result<(), String> {
    let total =
        state.players.iter().map(|p| u64::from(p.chips)).sum::<u64>() + u64::from(state.round.volume);
    if total != baseline {
        return Err(format!("chip total {total} drifted from baseline {baseline}"));
    }
    Ok(())
}

/// Total chips currently in the system (stacks plus pot).
pub fn total_chips(state: &PokerState) -> u64 {
    state.players.iter().map(|p| u64::from(p.chips)).sum::<u64>() + u64::from(state.round.volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::deal_cards;
    use holdem_shared::{PlayerState, TableConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fresh_deal_passes_audit() {
        let mut s = PokerState::new("t", TableConfig::default());
        for i in 0..4 {
            s.players
                .push(PlayerState::new(format!("p{i}").into(), format!("P{i}"), 1000));
        }
        let baseline = total_chips(&s);
        let mut rng = StdRng::seed_from_u64(11);
        let s = deal_cards(s, &mut rng).unwrap();
        audit(&s).unwrap();
        audit_chips(&s, baseline).unwrap();
    }

    #[test]
    fn duplicate_card_is_caught() {
        let mut s = PokerState::new("t", TableConfig::default());
        for i in 0..2 {
            s.players
                .push(PlayerState::new(format!("p{i}").into(), format!("P{i}"), 1000));
        }
        let mut rng = StdRng::seed_from_u64(12);
        let mut s = deal_cards(s, &mut rng).unwrap();
        s.players[0].hand[0] = s.players[1].hand[0];
        assert!(audit(&s).is_err());
    }
}
