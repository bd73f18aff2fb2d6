//! Poker hand evaluation.

pub mod evaluation;

pub use evaluation::{evaluate_best_hand, pick_best_five, rank_cards};
