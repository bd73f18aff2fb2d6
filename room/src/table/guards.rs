//! Event admission: fail fast before any reducer runs.

use holdem_shared::{GameEvent, PokerState, RoomError, TableAction, TableStatus};

/// Validate an externally submitted event against the current state. Nothing
/// is mutated here; a rejection leaves the state byte-identical.
pub fn admit(state: &PokerState, event: &GameEvent) -> Result<(), RoomError> {
    if event.is_internal() {
        return Err(RoomError::inconsistent(format!(
            "internal event submitted externally: {event:?}"
        )));
    }
    match event {
        GameEvent::Table { player_id, action, .. } => match action {
            TableAction::Join => {
                if state.table_status != TableStatus::Waiting
                    || state.players.len() >= state.config.max_seats
                {
                    return Err(RoomError::TableLocked);
                }
                if state.seat_of(player_id).is_some() {
                    return Err(RoomError::inconsistent(format!(
                        "player {player_id} already seated"
                    )));
                }
                Ok(())
            }
            TableAction::Leave => match state.table_status {
                // leave a waiting table, or forfeit between rounds
                TableStatus::Waiting | TableStatus::RoundOver => Ok(()),
                _ => Err(RoomError::TableLocked),
            },
        },
        GameEvent::Move { player_id, .. } => {
            if state.table_status != TableStatus::Playing {
                return Err(RoomError::NotYourTurn);
            }
            match state.current_player() {
                Some(p) if &p.id == player_id => Ok(()),
                _ => Err(RoomError::NotYourTurn),
            }
        }
        GameEvent::Start => match state.table_status {
            TableStatus::Waiting => {
                if state.funded_seats().len() < state.config.min_players {
                    Err(RoomError::InsufficientPlayers)
                } else {
                    Ok(())
                }
            }
            _ => Err(RoomError::GameAlreadyStarted),
        },
        GameEvent::AutoRestart => {
            if state.table_status != TableStatus::GameOver {
                return Err(RoomError::GameNotOver);
            }
            Ok(())
        }
        GameEvent::TransitionPhase | GameEvent::NextRound | GameEvent::EndGame => {
            Err(RoomError::inconsistent("unreachable: internal event"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::{Move, PlayerState, TableConfig};

    fn waiting_table(n: usize) -> PokerState {
        let mut s = PokerState::new("t", TableConfig::default());
        for i in 0..n {
            s.players
                .push(PlayerState::new(format!("p{i}").into(), format!("P{i}"), 1000));
        }
        s
    }

    #[test]
    fn internal_events_are_rejected_from_outside() {
        let s = waiting_table(2);
        for ev in [
            GameEvent::TransitionPhase,
            GameEvent::NextRound,
            GameEvent::EndGame,
        ] {
            assert!(matches!(
                admit(&s, &ev),
                Err(RoomError::InconsistentState { .. })
            ));
        }
    }

    #[test]
    fn join_is_locked_outside_waiting() {
        let mut s = waiting_table(2);
        s.table_status = TableStatus::Playing;
        assert_eq!(
            admit(&s, &GameEvent::join("x", "X")),
            Err(RoomError::TableLocked)
        );
        s.table_status = TableStatus::RoundOver;
        assert_eq!(
            admit(&s, &GameEvent::join("x", "X")),
            Err(RoomError::TableLocked)
        );
    }

    #[test]
    fn leave_is_allowed_waiting_and_between_rounds_only() {
        let mut s = waiting_table(2);
        assert_eq!(admit(&s, &GameEvent::leave("p0")), Ok(()));
        s.table_status = TableStatus::RoundOver;
        assert_eq!(admit(&s, &GameEvent::leave("p0")), Ok(()));
        s.table_status = TableStatus::Playing;
        assert_eq!(
            admit(&s, &GameEvent::leave("p0")),
            Err(RoomError::TableLocked)
        );
        s.table_status = TableStatus::GameOver;
        assert_eq!(
            admit(&s, &GameEvent::leave("p0")),
            Err(RoomError::TableLocked)
        );
    }

    #[test]
    fn start_needs_min_players() {
        let s = waiting_table(1);
        assert_eq!(
            admit(&s, &GameEvent::Start),
            Err(RoomError::InsufficientPlayers)
        );
        let s = waiting_table(2);
        assert_eq!(admit(&s, &GameEvent::Start), Ok(()));
    }

    #[test]
    fn second_start_is_rejected() {
        let mut s = waiting_table(2);
        s.table_status = TableStatus::Playing;
        assert_eq!(
            admit(&s, &GameEvent::Start),
            Err(RoomError::GameAlreadyStarted)
        );
    }

    #[test]
    fn move_requires_turn_ownership() {
        let mut s = waiting_table(2);
        s.table_status = TableStatus::Playing;
        s.current_player_index = Some(0);
        assert_eq!(
            admit(&s, &GameEvent::mv("p1", Move::Call)),
            Err(RoomError::NotYourTurn)
        );
        assert_eq!(admit(&s, &GameEvent::mv("p0", Move::Call)), Ok(()));
    }

    #[test]
    fn restart_requires_game_over() {
        let s = waiting_table(2);
        assert_eq!(
            admit(&s, &GameEvent::AutoRestart),
            Err(RoomError::GameNotOver)
        );
    }
}
