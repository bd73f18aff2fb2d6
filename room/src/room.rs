//! The room supervisor.
//!
//! A [`Room`] owns one table's authoritative [`PokerState`] behind a single
//! write lock. Every inbound event is guarded, reduced, settled (automatic
//! street/round/game transitions drained in the same transaction), audited
//! against the structural invariants, committed, and published on the update
//! stream. Callers observe one settled snapshot per accepted event.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use holdem_shared::{
    GameEvent, PlayerId, PlayerView, PokerState, RoomError, Street, TableAction, TableStatus,
};

use crate::config::Config;
use crate::table::{self, guards, invariants, seating};
use crate::view;

pub const CHANNEL_BUFFER_SIZE: usize = 256;

/// Handle to one table. Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct Room {
    inner: Arc<RwLock<Inner>>,
    updates: broadcast::Sender<PokerState>,
    start_delay: Duration,
    round_over_delay: Duration,
}

struct Inner {
    state: PokerState,
    rng: StdRng,
    /// Total chips in the system, captured whenever the player set changes.
    chips_baseline: u64,
    /// Set when an invariant audit failed; the room then rejects everything
    /// until an operator resets it.
    corrupt: Option<String>,
    closed: bool,
    /// Pending auto-progression task (start delay or round-over delay).
    schedule: Option<JoinHandle<()>>,
}

impl Room {
    /// Create a room from config. A seed makes every shuffle reproducible.
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        let state = PokerState::new(config.table_id.clone(), config.table());
        let (tx, _rx) = broadcast::channel(CHANNEL_BUFFER_SIZE);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state,
                rng,
                chips_baseline: 0,
                corrupt: None,
                closed: false,
                schedule: None,
            })),
            updates: tx,
            start_delay: config.start_delay(),
            round_over_delay: config.round_over_delay(),
        }
    }

    /// The current settled snapshot. Never mutates.
    pub async fn current_state(&self) -> PokerState {
        self.inner.read().await.state.clone()
    }

    /// The view projected for one seated player.
    pub async fn player_view(&self, player_id: &PlayerId) -> Result<PlayerView, RoomError> {
        let inner = self.inner.read().await;
        view::project(&inner.state, player_id)
    }

    /// Subscribe to the update stream: one snapshot per committed event, in
    /// commit order, no coalescing.
    pub fn state_updates(&self) -> broadcast::Receiver<PokerState> {
        self.updates.subscribe()
    }

    /// Start the game. Valid only while waiting with enough funded players.
    pub async fn start_game(&self) -> Result<PokerState, RoomError> {
        self.process_event(GameEvent::Start).await
    }

    /// Submit an external event. Rejections leave the state untouched and
    /// emit nothing on the update stream.
    pub async fn process_event(&self, event: GameEvent) -> Result<PokerState, RoomError> {
        self.handle(event, false).await
    }

    async fn apply_internal(&self, event: GameEvent) -> Result<PokerState, RoomError> {
        self.handle(event, true).await
    }

    async fn handle(&self, event: GameEvent, internal: bool) -> Result<PokerState, RoomError> {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return Err(RoomError::TableLocked);
        }
        if let Some(msg) = &inner.corrupt {
            return Err(RoomError::inconsistent(msg.clone()));
        }
        if !internal {
            if let Err(e) = guards::admit(&inner.state, &event) {
                tracing::debug!(event = ?event, error = %e, "event rejected");
                return Err(e);
            }
        }

        let next = match Self::reduce(&mut inner, &event) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(event = ?event, error = %e, "event rejected");
                return Err(e);
            }
        };

        match &event {
            // These legitimately change the chip total; re-capture it.
            GameEvent::Table { .. } | GameEvent::AutoRestart => {
                inner.chips_baseline = invariants::total_chips(&next);
            }
            _ => {
                let audit = invariants::audit(&next)
                    .and_then(|_| invariants::audit_chips(&next, inner.chips_baseline));
                if let Err(msg) = audit {
                    inner.corrupt = Some(msg.clone());
                    tracing::error!(%msg, "invariant violation; room flagged corrupt");
                    return Err(RoomError::inconsistent(msg));
                }
            }
        }

        inner.state = next.clone();
        let _ = self.updates.send(next.clone());
        self.reschedule(&mut inner, &next);
        tracing::info!(
            event = ?event,
            status = ?next.table_status,
            round = next.round.round_number,
            street = ?next.phase.street,
            pot = next.round.volume,
            "event committed"
        );
        Ok(next)
    }

    fn reduce(inner: &mut Inner, event: &GameEvent) -> Result<PokerState, RoomError> {
        let state = inner.state.clone();
        match event {
            GameEvent::Table {
                player_id,
                player_name,
                action,
            } => match action {
                TableAction::Join => seating::join_table(state, player_id, player_name),
                TableAction::Leave => seating::leave_table(state, player_id),
            },
            GameEvent::Move { player_id, action } => {
                let s = table::process_move(state, player_id, action.clone())?;
                Self::settle(s)
            }
            GameEvent::Start | GameEvent::NextRound => {
                let s = table::deal_cards(state, &mut inner.rng)?;
                Self::settle(s)
            }
            GameEvent::TransitionPhase => {
                let s = table::transition_phase(state)?;
                Self::settle(s)
            }
            GameEvent::EndGame => seating::end_game(state),
            GameEvent::AutoRestart => seating::restart_table(state),
        }
    }

    /// Drain every automatic transition (street complete, uncontested pot,
    /// all-in run-out, round close) so one inbound event produces one
    /// settled state.
    fn settle(state: PokerState) -> Result<PokerState, RoomError> {
        let mut s = state;
        loop {
            if s.table_status != TableStatus::Playing {
                break;
            }
            if s.phase.street == Street::Showdown {
                s = table::close_round(s)?;
                continue;
            }
            if s.in_hand_seats().len() <= 1 || s.current_player_index.is_none() {
                s = table::transition_phase(s)?;
                continue;
            }
            break;
        }
        Ok(s)
    }

    /// Re-plan the pending auto-progression after a commit. Any fresh event
    /// cancels and replaces the previous schedule, so a join during the
    /// start delay pushes the deal back.
    fn reschedule(&self, inner: &mut Inner, snapshot: &PokerState) {
        if let Some(handle) = inner.schedule.take() {
            handle.abort();
        }
        let planned = match snapshot.table_status {
            TableStatus::Waiting
                if snapshot.funded_seats().len() >= snapshot.config.min_players =>
            {
                Some((self.start_delay, GameEvent::Start))
            }
            TableStatus::RoundOver => Some((self.round_over_delay, GameEvent::NextRound)),
            _ => None,
        };
        if let Some((delay, event)) = planned {
            let room = self.clone();
            inner.schedule = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let ev = event.clone();
                if let Err(e) = room.apply_internal(ev).await {
                    tracing::debug!(event = ?event, error = %e, "scheduled transition skipped");
                }
            }));
        }
    }

    /// Cancel pending schedules, publish a terminal snapshot, and reject all
    /// further events with `TableLocked`.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return;
        }
        inner.closed = true;
        if let Some(handle) = inner.schedule.take() {
            handle.abort();
        }
        let _ = self.updates.send(inner.state.clone());
        tracing::info!(table = %inner.state.table_id, "room shut down");
    }
}
