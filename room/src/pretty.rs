//! Human-readable rendering of table snapshots for the server console.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use holdem_shared::{Card, Move, PlayerId, PokerState, TableStatus};

pub fn format_card(c: Card, color: bool) -> String {
    let text = format!("{}{}", c.rank.letter(), c.suit.glyph());
    if color && c.is_red() {
        text.red().to_string()
    } else {
        text
    }
}

pub fn format_cards(cards: &[Card], color: bool) -> String {
    cards
        .iter()
        .map(|&c| format_card(c, color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn player_name(state: &PokerState, id: &PlayerId) -> String {
    state
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// One console line describing the snapshot's most recent happening.
pub fn format_snapshot(state: &PokerState, color: bool) -> String {
    match state.table_status {
        TableStatus::Waiting => {
            format!(
                "waiting: {}/{} seated",
                state.players.len(),
                state.config.max_seats
            )
        }
        TableStatus::Playing => {
            let mut line = String::new();
            if let Some(mv) = &state.last_move {
                let who = player_name(state, &mv.player_id);
                let verb = match &mv.action {
                    Move::Fold => {
                        if color {
                            "folds".red().to_string()
                        } else {
                            "folds".to_string()
                        }
                    }
                    Move::Call => {
                        if color {
                            "calls".cyan().to_string()
                        } else {
                            "calls".to_string()
                        }
                    }
                    Move::AllIn => {
                        if color {
                            "shoves all-in".yellow().to_string()
                        } else {
                            "shoves all-in".to_string()
                        }
                    }
                    Move::Raise { amount, .. } => format!("raises to {amount}"),
                };
                let _ = write!(line, "{who} {verb} | ");
            }
            let _ = write!(
                line,
                "{:?} pot {} board [{}] to act: {}",
                state.phase.street,
                state.round.volume,
                format_cards(&state.community, color),
                state
                    .current_player()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
            );
            line
        }
        TableStatus::RoundOver | TableStatus::GameOver => {
            let mut line = String::new();
            if let Some(result) = &state.last_round_result {
                let winners = result
                    .winner_ids
                    .iter()
                    .map(|id| player_name(state, id))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = write!(line, "pot {} goes to {}", result.pot, winners);
                for h in &result.hand_results {
                    let _ = write!(
                        line,
                        " | {} shows {} ({:?})",
                        player_name(state, &h.player_id),
                        format_cards(&h.hole, color),
                        h.rank.category,
                    );
                }
            }
            if state.table_status == TableStatus::GameOver {
                let champ = state
                    .winner
                    .as_ref()
                    .map(|id| player_name(state, id))
                    .unwrap_or_else(|| "-".to_string());
                let tail = format!(" | game over, winner: {champ}");
                let _ = write!(
                    line,
                    "{}",
                    if color { tail.bold().to_string() } else { tail }
                );
            }
            line
        }
    }
}

/// Table banner printed at the start of each round.
pub fn format_table_header(state: &PokerState, color: bool) -> String {
    let mut line = format!(
        "=== round {} | blinds {}/{} | dealer {} ===",
        state.round.round_number,
        state.config.small_blind,
        state.config.big_blind,
        state
            .dealer_id
            .as_ref()
            .map(|id| player_name(state, id))
            .unwrap_or_else(|| "-".to_string()),
    );
    if color {
        line = line.bold().to_string();
    }
    for p in &state.players {
        let _ = write!(
            line,
            "\n  {:<12} {:>6} chips {}",
            p.name,
            p.chips,
            p.position.map(|pos| format!("({pos:?})")).unwrap_or_default(),
        );
    }
    line
}
