//! UseCase: 切断（disconnect）
//!
//! 理由を問わず、切断された接続は配送先から外し、参加者レコードがあれば削除して
//! 残りの全員に参加者リストと userLeft を送ります。
//! レコードがなければ（未参加・回収済み）何も送りません。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, LobbyEvent, MessagePusher, Participant},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::broadcast_or_warn;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(repository: InMemoryLobbyRepository, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - 削除された参加者
    /// * `None` - 参加者レコードがなかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Participant> {
        // 切断済みの接続には何も送らない
        self.message_pusher.unregister_client(connection_id).await;

        let mut lobby = self.repository.lock().await;

        let removed = lobby.registry.remove(connection_id).ok()?;
        tracing::info!(
            "'{}' left the lobby (remaining: {})",
            removed.display_name,
            lobby.registry.count()
        );

        let pusher = self.message_pusher.as_ref();
        broadcast_or_warn(pusher, &LobbyEvent::PlayersList(lobby.registry.snapshot())).await;
        broadcast_or_warn(pusher, &LobbyEvent::UserLeft(removed.display_name.clone())).await;

        Some(removed)
    }
}
