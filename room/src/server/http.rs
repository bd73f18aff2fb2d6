// HTTP handler for the room server API.
//
// Provides a single transport-agnostic endpoint that mirrors websocket
// behavior by delegating to the centralized `dispatch_client_message`.

use axum::{extract::State, Json};

use crate::server::AppState;
use holdem_shared::{ClientMsg, ServerMsg};

/// Unified handler for all ClientMsg variants. Returns the ServerMsg reply.
pub async fn message_handler(
    State(state): State<AppState>,
    Json(cm): Json<ClientMsg>,
) -> Json<ServerMsg> {
    Json(crate::server::dispatch_client_message(&state, cm).await)
}
