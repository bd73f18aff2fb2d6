//! Shared application state and the transport-agnostic message dispatcher.

use crate::room::Room;
use holdem_shared::{ClientMsg, ServerMsg};

/// State handed to every transport handler. Cloning shares the same room.
#[derive(Clone)]
pub struct AppState {
    pub room: Room,
}

impl AppState {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

/// Unified handler for `ClientMsg` coming from any transport.
///
/// Centralizes validation and state mutation; the WebSocket and HTTP
/// endpoints both delegate here so behavior cannot drift between them.
pub async fn dispatch_client_message(state: &AppState, cm: ClientMsg) -> ServerMsg {
    match cm {
        ClientMsg::CurrentState => ServerMsg::State(state.room.current_state().await),
        ClientMsg::StartGame => match state.room.start_game().await {
            Ok(s) => ServerMsg::State(s),
            Err(e) => ServerMsg::Error(e),
        },
        ClientMsg::Event(ev) => match state.room.process_event(ev).await {
            Ok(s) => ServerMsg::State(s),
            Err(e) => ServerMsg::Error(e),
        },
        ClientMsg::PlayerView { player_id } => match state.room.player_view(&player_id).await {
            Ok(v) => ServerMsg::View(v),
            Err(e) => ServerMsg::Error(e),
        },
    }
}
