//! Best-five-of-seven hand evaluation.
//!
//! Ranks any 5 to 7 distinct cards into a [`HandRank`]: category plus kicker
//! values in descending significance. `HandRank`'s derived ordering is total,
//! so showdown comparison is a plain `cmp`.

use holdem_shared::{Card, CardRank, CardSuit, HandRank, HandRankCategory};

const NUM_SUITS: usize = 4;
// Index by ace-high value 2..=14 (slot 1 is the wheel ace).
const VALUE_SLOTS: usize = 15;

/// Ace-high value of a rank: the ace (1) plays as 14 here.
#[inline]
fn high_value(rank: CardRank) -> u8 {
    match rank {
        CardRank::Ace => 14,
        r => r.value(),
    }
}

/// Evaluate the best 5-card hand from hole cards plus community cards.
pub fn evaluate_best_hand(hole: &[Card], community: &[Card]) -> HandRank {
    let cards: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    rank_cards(&cards)
}

/// Rank 5 to 7 distinct cards. With more than five cards the result is the
/// rank of the best five-card subset; ties between subsets resolve to the
/// maximum by construction, since every check below scans values high-to-low.
pub fn rank_cards(cards: &[Card]) -> HandRank {
    let values: Vec<u8> = cards.iter().map(|&c| high_value(c.rank)).collect();
    let mut counts = [0u8; VALUE_SLOTS];
    for &v in &values {
        counts[v as usize] += 1;
    }

    let suited = flush_values(cards);

    if let Some(vs) = &suited {
        if let Some(high) = straight_high(vs) {
            return HandRank {
                category: HandRankCategory::StraightFlush,
                tiebreakers: vec![high],
            };
        }
    }

    if let Some(quad) = highest_with_count(&counts, 4) {
        let kicker = distinct_desc(&counts, &[quad]).first().copied().unwrap_or(0);
        return HandRank {
            category: HandRankCategory::FourKind,
            tiebreakers: vec![quad, kicker],
        };
    }

    let trips: Vec<u8> = (2..=14u8)
        .rev()
        .filter(|&v| counts[v as usize] >= 3)
        .collect();
    if let Some(&trip) = trips.first() {
        // Any other value paired (including a second trip) fills the house.
        let pair = (2..=14u8)
            .rev()
            .find(|&v| v != trip && counts[v as usize] >= 2);
        if let Some(pair) = pair {
            return HandRank {
                category: HandRankCategory::FullHouse,
                tiebreakers: vec![trip, pair],
            };
        }
    }

    if let Some(vs) = suited {
        let mut top = vs;
        top.sort_unstable_by(|a, b| b.cmp(a));
        top.truncate(5);
        return HandRank {
            category: HandRankCategory::Flush,
            tiebreakers: top,
        };
    }

    if let Some(high) = straight_high(&values) {
        return HandRank {
            category: HandRankCategory::Straight,
            tiebreakers: vec![high],
        };
    }

    if let Some(&trip) = trips.first() {
        let mut t = vec![trip];
        t.extend(distinct_desc(&counts, &[trip]).into_iter().take(2));
        return HandRank {
            category: HandRankCategory::ThreeKind,
            tiebreakers: t,
        };
    }

    let pairs: Vec<u8> = (2..=14u8)
        .rev()
        .filter(|&v| counts[v as usize] >= 2)
        .collect();
    match pairs.as_slice() {
        [p_high, p_low, ..] => {
            let kicker = distinct_desc(&counts, &[*p_high, *p_low])
                .first()
                .copied()
                .unwrap_or(0);
            HandRank {
                category: HandRankCategory::TwoPair,
                tiebreakers: vec![*p_high, *p_low, kicker],
            }
        }
        [pair] => {
            let mut t = vec![*pair];
            t.extend(distinct_desc(&counts, &[*pair]).into_iter().take(3));
            HandRank {
                category: HandRankCategory::Pair,
                tiebreakers: t,
            }
        }
        [] => {
            let mut highs = distinct_desc(&counts, &[]);
            highs.truncate(5);
            HandRank {
                category: HandRankCategory::HighCard,
                tiebreakers: highs,
            }
        }
    }
}

/// The exact best 5-card combination, for presentation at showdown.
/// Enumerates every 5-card subset and keeps the highest-ranked one.
pub fn pick_best_five(hole: &[Card], community: &[Card]) -> [Card; 5] {
    let all: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    let n = all.len();

    // Early streets: fewer than five cards, return the highest available
    // padded with a filler slot.
    let filler = Card::new(CardRank::Two, CardSuit::Clubs);
    if n < 5 {
        let mut sorted = all.clone();
        sorted.sort_unstable_by(|a, b| high_value(b.rank).cmp(&high_value(a.rank)));
        let mut out = [filler; 5];
        for (slot, card) in out.iter_mut().zip(sorted) {
            *slot = card;
        }
        return out;
    }

    let mut best: Option<(HandRank, [Card; 5])> = None;
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [all[a], all[b], all[c], all[d], all[e]];
                        let rank = rank_cards(&five);
                        if best.as_ref().is_none_or(|(r, _)| rank > *r) {
                            best = Some((rank, five));
                        }
                    }
                }
            }
        }
    }
    best.map(|(_, five)| five).unwrap_or([filler; 5])
}

/// Values of the flush suit, if any suit has five or more cards.
fn flush_values(cards: &[Card]) -> Option<Vec<u8>> {
    let mut by_suit: [Vec<u8>; NUM_SUITS] = Default::default();
    for &c in cards {
        by_suit[c.suit as usize].push(high_value(c.rank));
    }
    by_suit.into_iter().find(|vs| vs.len() >= 5)
}

/// High card of the best straight among `values`, ace playing high or low.
fn straight_high(values: &[u8]) -> Option<u8> {
    let mut vs = values.to_vec();
    vs.sort_unstable();
    vs.dedup();
    if vs.last() == Some(&14) {
        // wheel: ace counts as 1 below the 2
        vs.insert(0, 1);
    }
    let mut best = None;
    let mut run = 1usize;
    for i in 1..vs.len() {
        if vs[i] == vs[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best = Some(vs[i]);
            }
        } else {
            run = 1;
        }
    }
    best
}

/// Highest value with at least `min_count` occurrences, if any.
fn highest_with_count(counts: &[u8; VALUE_SLOTS], min_count: u8) -> Option<u8> {
    (2..=14u8).rev().find(|&v| counts[v as usize] >= min_count)
}

/// Distinct values present in `counts`, descending, minus `exclude`.
fn distinct_desc(counts: &[u8; VALUE_SLOTS], exclude: &[u8]) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&v| counts[v as usize] > 0 && !exclude.contains(&v))
        .collect()
}
