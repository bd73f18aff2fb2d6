// WebSocket handler: initial snapshot, broadcast forwarding, and
// request/response for client messages.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::StreamExt;
use tokio::sync::broadcast;

use crate::server::state::AppState;
use holdem_shared::{ClientMsg, RoomError, ServerMsg};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::info!("websocket client connected");

    // Subscribe before sending the initial snapshot so no committed state
    // can fall between the two.
    let mut rx = state.room.state_updates();
    let initial = state.room.current_state().await;
    send_ws(&mut socket, &ServerMsg::State(initial)).await;

    loop {
        tokio::select! {
            biased;

            update = rx.recv() => {
                match update {
                    Ok(snapshot) => {
                        send_ws(&mut socket, &ServerMsg::State(snapshot)).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Catch up from the next snapshot; every snapshot is
                        // a full state so nothing is unrecoverable.
                        tracing::warn!(missed, "websocket subscriber lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = socket.next() => {
                match msg {
                    Some(Ok(Message::Text(txt))) => {
                        match serde_json::from_str::<ClientMsg>(&txt) {
                            Ok(cm) => {
                                let resp = crate::server::dispatch_client_message(&state, cm).await;
                                send_ws(&mut socket, &resp).await;
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "failed to parse incoming ClientMsg JSON");
                                tracing::debug!(raw_in = %txt);
                                let err = RoomError::inconsistent("malformed client message");
                                send_ws(&mut socket, &ServerMsg::Error(err)).await;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
    tracing::info!("websocket client disconnected");
}

async fn send_ws(socket: &mut WebSocket, msg: &ServerMsg) {
    match serde_json::to_string(msg) {
        Ok(txt) => {
            let _ = socket.send(Message::Text(txt)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize ServerMsg for websocket send");
        }
    }
}
