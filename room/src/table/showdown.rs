//! Showdown resolution and round close.

use holdem_shared::{
    Bet, HandRank, HandResult, PlayerId, PlayerStatus, PokerState, RoomError, RoundResult, Street,
    TableStatus,
};

use crate::poker::{evaluate_best_hand, pick_best_five};

/// Settle the round: evaluate contested hands, pay out the pot (layered by
/// all-in contribution levels so nobody wins more than they could cover),
/// record the result, tear the round down, and decide whether the table
/// continues or the game is over.
pub fn close_round(state: PokerState) -> Result<PokerState, RoomError> {
    let mut s = state;
    if s.table_status != TableStatus::Playing || s.phase.street != Street::Showdown {
        return Err(RoomError::inconsistent("round close outside showdown"));
    }
    let contenders = s.in_hand_seats();
    if contenders.is_empty() {
        return Err(RoomError::inconsistent("no contenders at showdown"));
    }
    let dealer = s.dealer_seat().unwrap_or(0);

    // A contested showdown reveals every contender's hand; an uncontested
    // one reveals nothing.
    let mut ranks: Vec<(usize, HandRank)> = Vec::new();
    let mut results: Vec<HandResult> = Vec::new();
    if contenders.len() > 1 {
        for &i in &contenders {
            let p = &s.players[i];
            let rank = evaluate_best_hand(&p.hand, &s.community);
            results.push(HandResult {
                player_id: p.id.clone(),
                rank: rank.clone(),
                best_five: pick_best_five(&p.hand, &s.community),
                hole: p.hand.clone(),
            });
            ranks.push((i, rank));
        }
    }

    let pot = s.round.volume;
    let winner_seats = winners_of(&contenders, &ranks);
    let payouts = award_pots(&s, &contenders, &ranks, dealer);
    for &(seat, amount) in &payouts {
        s.players[seat].chips += amount;
    }
    s.round.volume = 0;
    s.last_round_result = Some(RoundResult {
        winner_ids: winner_seats
            .iter()
            .map(|&i| s.players[i].id.clone())
            .collect(),
        pot,
        hand_results: results,
    });

    // Round teardown: cards leave the table, contributions reset.
    s.deck.clear();
    s.community.clear();
    s.burnt.clear();
    for p in &mut s.players {
        p.hand.clear();
        p.bet = Bet::default();
        p.position = None;
        p.played_this_phase = false;
    }
    for p in &mut s.players {
        if p.chips == 0 {
            p.status = PlayerStatus::Eliminated;
        }
    }
    s.current_player_index = None;

    let funded = s.funded_seats();
    let cap_reached = s
        .config
        .max_rounds
        .is_some_and(|m| s.round.round_number >= m);
    if funded.len() <= 1 || cap_reached {
        s.table_status = TableStatus::GameOver;
        s.winner = chip_leader(&s);
    } else {
        s.table_status = TableStatus::RoundOver;
    }
    Ok(s)
}

/// Seats holding the best rank among contenders (all of them tie), or the
/// sole remaining contender when everyone else folded.
fn winners_of(contenders: &[usize], ranks: &[(usize, HandRank)]) -> Vec<usize> {
    if contenders.len() == 1 {
        return contenders.to_vec();
    }
    let best = ranks.iter().map(|(_, r)| r).max().cloned();
    match best {
        Some(b) => ranks
            .iter()
            .filter(|(_, r)| *r == b)
            .map(|(i, _)| *i)
            .collect(),
        None => Vec::new(),
    }
}

/// Distribute the pot in layers bounded by the contenders' per-round
/// contributions: each layer goes to the best-ranked contenders who covered
/// it, ties split evenly with remainder chips paid to the earliest seats
/// after the button. The sum of payouts always equals the pot.
fn award_pots(
    s: &PokerState,
    contenders: &[usize],
    ranks: &[(usize, HandRank)],
    dealer: usize,
) -> Vec<(usize, u32)> {
    let n = s.players.len();
    let mut payouts: Vec<(usize, u32)> = Vec::new();

    if contenders.len() == 1 {
        payouts.push((contenders[0], s.round.volume));
        return payouts;
    }

    let mut levels: Vec<u32> = contenders.iter().map(|&i| s.players[i].bet.round).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut prev = 0u32;
    for (li, &level) in levels.iter().enumerate() {
        let mut amount: u32 = s
            .players
            .iter()
            .map(|p| p.bet.round.min(level) - p.bet.round.min(prev))
            .sum();
        if li + 1 == levels.len() {
            // dead money above the top contender level (an overbet everyone
            // folded to) rides along with the final layer
            amount += s
                .players
                .iter()
                .map(|p| p.bet.round.saturating_sub(level))
                .sum::<u32>();
        }
        prev = level;
        if amount == 0 {
            continue;
        }

        let eligible: Vec<usize> = contenders
            .iter()
            .copied()
            .filter(|&i| s.players[i].bet.round >= level)
            .collect();
        let best = ranks
            .iter()
            .filter(|(i, _)| eligible.contains(i))
            .map(|(_, r)| r)
            .max()
            .cloned();
        let winners: Vec<usize> = match &best {
            Some(b) => ranks
                .iter()
                .filter(|(i, r)| eligible.contains(i) && r == b)
                .map(|(i, _)| *i)
                .collect(),
            None => eligible,
        };

        let mut order = winners.clone();
        order.sort_by_key(|&i| (i + n - dealer - 1) % n);
        let share = amount / winners.len() as u32;
        let rem = amount % winners.len() as u32;
        for (k, &w) in order.iter().enumerate() {
            let extra = u32::from((k as u32) < rem);
            match payouts.iter_mut().find(|(seat, _)| *seat == w) {
                Some((_, total)) => *total += share + extra,
                None => payouts.push((w, share + extra)),
            }
        }
    }
    payouts
}

/// Player with the deepest stack, earliest seat breaking ties.
pub(crate) fn chip_leader(s: &PokerState) -> Option<PlayerId> {
    let mut best: Option<usize> = None;
    for (i, p) in s.players.iter().enumerate() {
        if best.is_none_or(|b| p.chips > s.players[b].chips) {
            best = Some(i);
        }
    }
    best.map(|i| s.players[i].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::{Card, CardRank, CardSuit, PlayerState, TableConfig};

    fn card(rank: CardRank, suit: CardSuit) -> Card {
        Card::new(rank, suit)
    }

    /// A hand-built table at showdown: every listed player is in hand with
    /// the given hole cards and round contribution.
    fn showdown_table(entries: &[(&str, [Card; 2], u32, u32)], board: [Card; 5]) -> PokerState {
        let mut s = PokerState::new("t", TableConfig::default());
        for &(id, hole, chips, contributed) in entries {
            let mut p = PlayerState::new(id.into(), id, chips);
            p.hand = hole.to_vec();
            p.bet.round = contributed;
            if chips == 0 {
                p.status = PlayerStatus::AllIn;
            }
            s.players.push(p);
        }
        s.community = board.to_vec();
        s.round.round_number = 1;
        s.round.volume = entries.iter().map(|e| e.3).sum();
        s.table_status = TableStatus::Playing;
        s.phase.street = Street::Showdown;
        s.dealer_id = Some(s.players[0].id.clone());
        // burnt + deck do not matter once the board is out
        s
    }

    #[test]
    fn split_pot_divides_evenly_between_equal_straights() {
        let board = [
            card(CardRank::Four, CardSuit::Clubs),
            card(CardRank::Five, CardSuit::Diamonds),
            card(CardRank::Six, CardSuit::Hearts),
            card(CardRank::Seven, CardSuit::Spades),
            card(CardRank::Eight, CardSuit::Clubs),
        ];
        let s = showdown_table(
            &[
                ("a", [card(CardRank::Nine, CardSuit::Clubs), card(CardRank::Two, CardSuit::Hearts)], 980, 20),
                ("b", [card(CardRank::Nine, CardSuit::Diamonds), card(CardRank::Three, CardSuit::Hearts)], 980, 20),
                ("c", [card(CardRank::Two, CardSuit::Spades), card(CardRank::Two, CardSuit::Clubs)], 980, 20),
                ("d", [card(CardRank::Three, CardSuit::Spades), card(CardRank::Three, CardSuit::Clubs)], 980, 20),
            ],
            board,
        );
        let total_before: u32 = s.players.iter().map(|p| p.chips).sum::<u32>() + s.round.volume;
        let s = close_round(s).unwrap();

        let result = s.last_round_result.as_ref().unwrap();
        assert_eq!(result.pot, 80);
        assert_eq!(result.winner_ids.len(), 2);
        assert!(result.winner_ids.contains(&"a".into()));
        assert!(result.winner_ids.contains(&"b".into()));
        // both nine-high straights take 40 each
        assert_eq!(s.players[0].chips, 1020);
        assert_eq!(s.players[1].chips, 1020);
        let total_after: u32 = s.players.iter().map(|p| p.chips).sum();
        assert_eq!(total_before, total_after);
        assert_eq!(s.winner, None);
        assert_eq!(s.table_status, TableStatus::RoundOver);
    }

    #[test]
    fn all_in_winner_is_capped_at_their_level() {
        // a is all-in for 15 against b's 20: a can win at most 30
        let board = [
            card(CardRank::Ace, CardSuit::Clubs),
            card(CardRank::Five, CardSuit::Diamonds),
            card(CardRank::Nine, CardSuit::Hearts),
            card(CardRank::Jack, CardSuit::Spades),
            card(CardRank::Two, CardSuit::Clubs),
        ];
        let s = showdown_table(
            &[
                ("b", [card(CardRank::Seven, CardSuit::Clubs), card(CardRank::Eight, CardSuit::Diamonds)], 480, 20),
                ("a", [card(CardRank::Ace, CardSuit::Spades), card(CardRank::Ace, CardSuit::Diamonds)], 0, 15),
            ],
            board,
        );
        let s = close_round(s).unwrap();
        // a's trip aces win the covered layer; the uncalled 5 returns to b
        assert_eq!(s.players[1].chips, 30);
        assert_eq!(s.players[0].chips, 485);
        let result = s.last_round_result.as_ref().unwrap();
        assert_eq!(result.winner_ids, vec!["a".into()]);
    }

    #[test]
    fn odd_chips_go_to_earliest_seats_after_button() {
        let board = [
            card(CardRank::Four, CardSuit::Clubs),
            card(CardRank::Five, CardSuit::Diamonds),
            card(CardRank::Six, CardSuit::Hearts),
            card(CardRank::Seven, CardSuit::Spades),
            card(CardRank::Eight, CardSuit::Clubs),
        ];
        // three equal straights split a 65-chip pot (60 live + 5 dead from a
        // folder): 65 / 3 leaves two odd chips
        let mut s = showdown_table(
            &[
                ("a", [card(CardRank::Nine, CardSuit::Clubs), card(CardRank::Two, CardSuit::Hearts)], 0, 20),
                ("b", [card(CardRank::Nine, CardSuit::Diamonds), card(CardRank::Three, CardSuit::Hearts)], 0, 20),
                ("c", [card(CardRank::Nine, CardSuit::Spades), card(CardRank::Two, CardSuit::Diamonds)], 0, 20),
            ],
            board,
        );
        let mut folder = PlayerState::new("d".into(), "d", 95);
        folder.status = PlayerStatus::Folded;
        folder.bet.round = 5;
        s.players.push(folder);
        s.round.volume += 5;

        let s = close_round(s).unwrap();
        let total: u32 = s.players.iter().map(|p| p.chips).sum();
        assert_eq!(total, 65 + 95);
        // share is 21 each; the two spare chips land left of the dealer
        // (seat 0) first: b, then c
        assert_eq!(s.players[1].chips, 22);
        assert_eq!(s.players[2].chips, 22);
        assert_eq!(s.players[0].chips, 21);
    }

    #[test]
    fn uncontested_pot_reveals_no_hands() {
        let mut s = PokerState::new("t", TableConfig::default());
        let mut a = PlayerState::new("a".into(), "a", 480);
        a.hand = vec![
            card(CardRank::Ace, CardSuit::Spades),
            card(CardRank::Ace, CardSuit::Hearts),
        ];
        a.bet.round = 20;
        let mut b = PlayerState::new("b".into(), "b", 480);
        b.status = PlayerStatus::Folded;
        b.bet.round = 20;
        s.players.push(a);
        s.players.push(b);
        s.round.round_number = 1;
        s.round.volume = 40;
        s.table_status = TableStatus::Playing;
        s.phase.street = Street::Showdown;
        s.dealer_id = Some("a".into());
        let s = close_round(s).unwrap();
        let result = s.last_round_result.as_ref().unwrap();
        assert!(result.hand_results.is_empty());
        assert_eq!(result.winner_ids, vec!["a".into()]);
        assert_eq!(s.players[0].chips, 520);
    }

    #[test]
    fn busted_player_ends_the_game() {
        let board = [
            card(CardRank::Ace, CardSuit::Clubs),
            card(CardRank::Five, CardSuit::Diamonds),
            card(CardRank::Nine, CardSuit::Hearts),
            card(CardRank::Jack, CardSuit::Spades),
            card(CardRank::Two, CardSuit::Clubs),
        ];
        let s = showdown_table(
            &[
                ("a", [card(CardRank::Ace, CardSuit::Spades), card(CardRank::Ace, CardSuit::Diamonds)], 0, 500),
                ("b", [card(CardRank::Seven, CardSuit::Clubs), card(CardRank::Eight, CardSuit::Diamonds)], 0, 500),
            ],
            board,
        );
        let s = close_round(s).unwrap();
        assert_eq!(s.table_status, TableStatus::GameOver);
        assert_eq!(s.winner, Some("a".into()));
        assert_eq!(s.players[1].status, PlayerStatus::Eliminated);
    }
}
