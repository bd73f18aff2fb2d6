//! Pure state reducers over [`PokerState`](holdem_shared::PokerState).
//!
//! Every reducer takes the state by value and returns a new one (or a typed
//! error, leaving the caller's copy untouched). Nothing in here performs I/O
//! or holds locks; the supervisor in [`crate::room`] is the only mutator.

pub mod betting;
pub mod dealing;
pub mod flow;
pub mod guards;
pub mod invariants;
pub mod seating;
pub mod showdown;

pub use betting::process_move;
pub use dealing::{collect_blinds, deal_cards, rotate_blinds};
pub use flow::transition_phase;
pub use showdown::close_round;
