//! HTTP+SSE transport.
//!
//! Implements the legacy MCP SSE transport: a client opens `GET /mcp/sse`
//! and receives an `endpoint` event naming the message endpoint for its
//! session; it then POSTs JSON-RPC messages there and reads responses as
//! `message` events on the stream.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use futures::Stream;
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::Result;
use crate::server::McpServer;

/// Path serving the SSE event stream.
pub const SSE_PATH: &str = "/mcp/sse";
/// Path accepting JSON-RPC messages.
pub const MESSAGE_PATH: &str = "/mcp";

/// Responses buffered per session before POSTs are rejected.
const SESSION_BUFFER: usize = 64;

struct AppState {
    server: McpServer,
    sessions: Mutex<HashMap<Uuid, mpsc::Sender<String>>>,
}

impl AppState {
    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, mpsc::Sender<String>>> {
        // A poisoned lock only means a panicked request handler; the map
        // itself stays valid.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Build the axum router exposing the MCP endpoints.
pub fn router(server: McpServer) -> Router {
    let state = Arc::new(AppState {
        server,
        sessions: Mutex::new(HashMap::new()),
    });

    Router::new()
        .route(SSE_PATH, get(open_stream))
        .route(MESSAGE_PATH, post(post_message))
        .with_state(state)
}

/// Serve the MCP server on the given address.
pub async fn serve(server: McpServer, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "MCP server listening");
    axum::serve(listener, router(server)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageQuery {
    session_id: Uuid,
}

/// Removes the session entry when its SSE stream is dropped.
struct SessionGuard {
    id: Uuid,
    state: Arc<AppState>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.sessions().remove(&self.id);
        tracing::info!(session_id = %self.id, "SSE session closed");
    }
}

async fn open_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::channel(SESSION_BUFFER);
    state.sessions().insert(session_id, tx);
    tracing::info!(session_id = %session_id, "SSE session opened");

    let guard = SessionGuard {
        id: session_id,
        state,
    };

    let stream = async_stream::stream! {
        let _guard = guard;

        yield Ok::<_, Infallible>(
            Event::default()
                .event("endpoint")
                .data(format!("{MESSAGE_PATH}?sessionId={session_id}")),
        );

        while let Some(payload) = rx.recv().await {
            yield Ok(Event::default().event("message").data(payload));
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> StatusCode {
    let Some(tx) = state.sessions().get(&query.session_id).cloned() else {
        tracing::warn!(session_id = %query.session_id, "message for unknown session");
        return StatusCode::NOT_FOUND;
    };

    let Some(response) = state.server.handle(&body).await else {
        return StatusCode::ACCEPTED;
    };

    let payload = match serde_json::to_string(&response) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    if tx.send(payload).await.is_err() {
        // The stream closed between lookup and send.
        return StatusCode::GONE;
    }

    StatusCode::ACCEPTED
}
