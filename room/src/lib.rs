//! The authoritative hold'em room engine: deck, hand evaluator, pure state
//! reducers, and the supervisor that owns a table and publishes snapshots.

pub mod cli;
pub mod config;
pub mod deck;
pub mod poker;
pub mod pretty;
pub mod room;
pub mod server;
pub mod table;
pub mod view;
