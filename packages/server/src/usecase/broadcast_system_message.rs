//! UseCase: システムメッセージの一斉送信（管理操作）
//!
//! 送信者名は "System" 固定で、チャット履歴には残しません。

use std::sync::Arc;

use lobby_shared::time::Clock;

use crate::{
    domain::{ChatEvent, DisplayName, LobbyEvent, MessagePusher, MessageText, Timestamp},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::{broadcast_or_warn, error::BroadcastSystemMessageError};

pub struct BroadcastSystemMessageUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl BroadcastSystemMessageUseCase {
    pub fn new(
        repository: InMemoryLobbyRepository,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        text: Option<&str>,
    ) -> Result<ChatEvent, BroadcastSystemMessageError> {
        let text = MessageText::new(text.unwrap_or_default())
            .map_err(|_| BroadcastSystemMessageError::EmptyMessage)?;

        // 他のブロードキャストと順序を揃えるためにロックだけ取る
        let _lobby = self.repository.lock().await;

        let event = ChatEvent::new(
            DisplayName::system(),
            text,
            Timestamp::new(self.clock.now_millis()),
        );
        tracing::info!("Broadcasting system message ({} chars)", event.text.char_count());
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            &LobbyEvent::ChatMessage(event.clone()),
        )
        .await;

        Ok(event)
    }
}
