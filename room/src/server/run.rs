// Run and routing helpers (build_router, run_server, console logger).

use std::future::IntoFuture;
use std::io::IsTerminal;
use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Json, Router,
};

use anyhow::{Context, Result};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::pretty;
use crate::server::AppState;
use holdem_shared::TableStatus;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({ "ok": true })) }),
        )
        // WebSocket endpoint: snapshot stream + request/response
        .route("/ws", get(crate::server::ws::ws_handler))
        // HTTP API endpoint using the same ClientMsg/ServerMsg payloads
        .route("/api/message", post(crate::server::http::message_handler))
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state.clone());

    // Mirror committed snapshots onto the server console.
    {
        let room = state.room.clone();
        tokio::spawn(async move {
            run_console_logger(room).await;
        });
    }

    tracing::info!(%addr, "room server running");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    let server = axum::serve(listener, app).into_future();
    tokio::select! {
        res = server => {
            res.context("server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            state.room.shutdown().await;
        }
    }
    Ok(())
}

/// Follow the update stream and log one human-readable line per snapshot,
/// with a table banner whenever a new round begins.
async fn run_console_logger(room: crate::room::Room) {
    let color = std::io::stdout().is_terminal();
    let mut stream = BroadcastStream::new(room.state_updates());
    let mut last_round = 0u32;
    while let Some(item) = stream.next().await {
        match item {
            Ok(snapshot) => {
                if snapshot.table_status == TableStatus::Playing
                    && snapshot.round.round_number != last_round
                {
                    last_round = snapshot.round.round_number;
                    tracing::info!("{}", pretty::format_table_header(&snapshot, color));
                }
                tracing::info!("{}", pretty::format_snapshot(&snapshot, color));
            }
            Err(BroadcastStreamRecvError::Lagged(_)) => continue,
        }
    }
}
