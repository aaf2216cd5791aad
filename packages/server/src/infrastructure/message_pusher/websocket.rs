//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - `LobbyEvent` を JSON にシリアライズして送信（push_to, broadcast）
//! - キューが溢れた接続を配送先から外す
//!
//! ## 設計ノート
//!
//! WebSocket の受付と書き出しタスクは UI 層（`ui/handler/websocket.rs`）が持ちます。
//! この実装は `try_send` でキューへ投入するだけなので、送信が待たされることはありません。
//! 接続ごとのキューは 1 本なので、同じ接続への配送順は投入順と一致します。
//! 読まずに溜め続ける接続はキューが満杯になった時点で外され、以降は何も届きません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, LobbyEvent, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.broadcast(&LobbyEvent::ChatHistoryCleared).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    ///
    /// Key: connection_id (String)
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &LobbyEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id.into_string(), sender);
        tracing::debug!("Client registered to MessagePusher (total: {})", clients.len());
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id.as_str()).is_some() {
            tracing::debug!(
                "Client '{}' unregistered from MessagePusher (total: {})",
                connection_id,
                clients.len()
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &LobbyEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let mut clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        match sender.try_send(content) {
            Ok(()) => {
                tracing::debug!("Pushed '{}' to client '{}'", event.kind(), connection_id);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                clients.remove(connection_id.as_str());
                tracing::warn!(
                    "Outbound queue of client '{}' is full, unregistered it",
                    connection_id
                );
                Err(MessagePushError::QueueFull(connection_id.to_string()))
            }
            Err(e @ TrySendError::Closed(_)) => Err(MessagePushError::PushFailed(e.to_string())),
        }
    }

    async fn broadcast(&self, event: &LobbyEvent) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let mut clients = self.clients.lock().await;

        let mut delivered = 0;
        let mut overflowed = Vec::new();
        for (connection_id, sender) in clients.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            match sender.try_send(content.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => overflowed.push(connection_id.clone()),
                Err(e @ TrySendError::Closed(_)) => tracing::warn!(
                    "Failed to push '{}' to client '{}': {}",
                    event.kind(),
                    connection_id,
                    e
                ),
            }
        }
        for connection_id in overflowed {
            clients.remove(&connection_id);
            tracing::warn!(
                "Outbound queue of client '{}' is full, unregistered it",
                connection_id
            );
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} clients",
            event.kind(),
            delivered,
            clients.len()
        );

        Ok(())
    }
}
