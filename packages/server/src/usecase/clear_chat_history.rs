//! UseCase: チャット履歴の消去（管理操作）

use std::sync::Arc;

use crate::{
    domain::{LobbyEvent, MessagePusher},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::broadcast_or_warn;

pub struct ClearChatHistoryUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ClearChatHistoryUseCase {
    pub fn new(repository: InMemoryLobbyRepository, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 履歴を空にして chatHistoryCleared を全員に送る
    ///
    /// # Returns
    ///
    /// 消去した件数
    pub async fn execute(&self) -> usize {
        let mut lobby = self.repository.lock().await;

        let cleared = lobby.history.len();
        lobby.history.clear();
        tracing::info!("Chat history cleared ({} messages)", cleared);

        broadcast_or_warn(self.message_pusher.as_ref(), &LobbyEvent::ChatHistoryCleared).await;
        cleared
    }
}
