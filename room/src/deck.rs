//! Deck construction and shuffling.
//!
//! The RNG is injected by the caller so tests can seed it; the room owns a
//! `StdRng` created from OS entropy or a `--seed` argument.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use holdem_shared::{Card, CardRank, CardSuit};

pub const DECK_SIZE: usize = 52;

/// All 52 cards in a fixed reference order, suit by suit.
fn fresh_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &suit in &CardSuit::ALL {
        for &rank in &CardRank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// A uniformly shuffled 52-card deck. Dealing pops from the end of the
/// returned vector (the "top").
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = fresh_deck();
    deck.shuffle(rng);
    deck
}

/// Deterministic deck for tests and reproducible games.
pub fn shuffled_deck_with_seed(seed: u64) -> Vec<Card> {
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled_deck(&mut rng)
}
