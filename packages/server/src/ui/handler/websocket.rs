//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ClientEvent, infrastructure::dto::websocket::ClientMessage, ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer of the socket, so frames reach the client in the
/// order they were queued.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one text frame. Malformed JSON and unknown types yield `None`.
fn decode_client_event(text: &str) -> Option<ClientEvent> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => Some(ClientEvent::from(msg)),
        Err(e) => {
            tracing::warn!("Dropped undecodable frame: {}", e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a bounded channel for this client to receive messages
    let (tx, rx) = mpsc::channel(state.queue_capacity);
    let connection_id = state.controller.connect(tx).await;

    let mut send_task = pusher_loop(rx, sender);

    let controller = state.controller.clone();
    let id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", id, text.as_str());
                    if let Some(event) = decode_client_event(text.as_str()) {
                        controller.handle(&id, event).await;
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!("Dropped binary frame from '{}'", id);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.controller.disconnect(&connection_id).await;
}
