//! UseCase: チャット送信（chatMessage）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//! - 検証（空白のみ・未参加）、切り詰め、履歴への追加、全員へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 不正な入力は履歴にもブロードキャストにも影響してはならない
//! - 送信者本人を含む全員に届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者のメッセージ
//! - 異常系：空文字・空白のみ、未参加の接続
//! - エッジケース：500 文字を超えるメッセージ

use std::sync::Arc;

use lobby_shared::time::Clock;

use crate::{
    domain::{ChatEvent, ConnectionId, LobbyEvent, MessagePusher, MessageText, Timestamp},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::{broadcast_or_warn, error::SendChatMessageError};

/// チャット送信のユースケース
pub struct SendChatMessageUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
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

    /// チャット送信を実行
    ///
    /// 送信者名は登録済みの表示名、タイムスタンプはサーバー時刻を使います。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 履歴に追加され、ブロードキャストされたイベント
    /// * `Err(SendChatMessageError)` - 破棄した理由（クライアントには通知しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        text: Option<&str>,
    ) -> Result<ChatEvent, SendChatMessageError> {
        let text = MessageText::new(text.unwrap_or_default())
            .map_err(|_| SendChatMessageError::EmptyMessage)?;

        let mut lobby = self.repository.lock().await;

        let timestamp = Timestamp::new(self.clock.now_millis());
        let event = lobby
            .post_chat(connection_id, text, timestamp)
            .map_err(|_| SendChatMessageError::NotJoined)?;
        tracing::info!(
            "Broadcasting message from '{}' ({} chars)",
            event.display_name,
            event.text.char_count()
        );

        broadcast_or_warn(
            self.message_pusher.as_ref(),
            &LobbyEvent::ChatMessage(event.clone()),
        )
        .await;

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lobby, MAX_MESSAGE_CHARS, MockMessagePusher};
    use crate::usecase::test_support::{RecordingPusher, conn};
    use lobby_shared::time::FixedClock;

    fn joined_lobby() -> InMemoryLobbyRepository {
        let mut lobby = Lobby::new();
        lobby
            .registry
            .register(conn("a"), Some("Alice"), Timestamp::new(1000));
        lobby
            .registry
            .register(conn("b"), Some("Bob"), Timestamp::new(1000));
        InMemoryLobbyRepository::new(Arc::new(tokio::sync::Mutex::new(lobby)))
    }

    fn create_usecase(
        repository: InMemoryLobbyRepository,
        pusher: Arc<dyn MessagePusher>,
    ) -> SendChatMessageUseCase {
        SendChatMessageUseCase::new(repository, pusher, Arc::new(FixedClock::new(9_000)))
    }

    #[tokio::test]
    async fn test_send_message_success() {
        // テスト項目: 参加者のメッセージが履歴に追加され、全員にブロードキャストされる
        // given (前提条件):
        let repository = joined_lobby();
        let pusher = Arc::new(RecordingPusher::default());
        let usecase = create_usecase(repository.clone(), pusher.clone());

        // when (操作):
        let event = usecase.execute(&conn("a"), Some(" hi ")).await.unwrap();

        // then (期待する結果):
        assert_eq!(event.display_name.as_str(), "Alice");
        assert_eq!(event.text.as_str(), "hi");
        assert_eq!(event.timestamp, Timestamp::new(9_000));
        assert_eq!(repository.history().await, vec![event.clone()]);
        assert_eq!(pusher.broadcasts(), vec![LobbyEvent::ChatMessage(event)]);
    }

    #[tokio::test]
    async fn test_blank_message_is_dropped_without_broadcast() {
        // テスト項目: 空文字・空白のみのメッセージは履歴にも追加されず、ブロードキャストもされない
        // given (前提条件):
        let repository = joined_lobby();
        let mut mock = MockMessagePusher::new();
        mock.expect_broadcast().times(0);
        mock.expect_push_to().times(0);
        let usecase = create_usecase(repository.clone(), Arc::new(mock));

        // when (操作):
        let empty = usecase.execute(&conn("a"), Some("")).await;
        let blank = usecase.execute(&conn("a"), Some("   \t")).await;
        let absent = usecase.execute(&conn("a"), None).await;

        // then (期待する結果):
        assert_eq!(empty, Err(SendChatMessageError::EmptyMessage));
        assert_eq!(blank, Err(SendChatMessageError::EmptyMessage));
        assert_eq!(absent, Err(SendChatMessageError::EmptyMessage));
        assert!(repository.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_message_from_unjoined_connection_is_dropped() {
        // テスト項目: 未参加（または回収済み）の接続からのメッセージは破棄される
        // given (前提条件):
        let repository = joined_lobby();
        let mut mock = MockMessagePusher::new();
        mock.expect_broadcast().times(0);
        let usecase = create_usecase(repository.clone(), Arc::new(mock));

        // when (操作):
        let result = usecase.execute(&conn("ghost"), Some("boo")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendChatMessageError::NotJoined));
        assert!(repository.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_long_message_is_truncated() {
        // テスト項目: 600 文字のメッセージは 500 文字に切り詰めて記録される
        // given (前提条件):
        let repository = joined_lobby();
        let pusher = Arc::new(RecordingPusher::default());
        let usecase = create_usecase(repository.clone(), pusher);
        let long = "x".repeat(600);

        // when (操作):
        let event = usecase.execute(&conn("b"), Some(&long)).await.unwrap();

        // then (期待する結果):
        assert_eq!(event.text.char_count(), MAX_MESSAGE_CHARS);
        assert_eq!(repository.history().await[0].text.as_str(), "x".repeat(500));
    }
}
