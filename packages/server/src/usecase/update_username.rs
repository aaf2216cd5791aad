//! UseCase: 表示名の変更（updateUsername）
//!
//! 空白のみの名前や現在と同じ名前は何もしません。
//! 変更時は参加者リストだけを全員に送り、参加・退出の通知は出しません。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, DisplayName, LobbyEvent, MessagePusher, Participant},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::{broadcast_or_warn, error::UpdateUsernameError};

/// 表示名変更のユースケース
pub struct UpdateUsernameUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateUsernameUseCase {
    pub fn new(repository: InMemoryLobbyRepository, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 表示名変更を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 変更後の参加者レコード
    /// * `Err(UpdateUsernameError)` - 変更しなかった理由（クライアントには通知しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        new_name: Option<&str>,
    ) -> Result<Participant, UpdateUsernameError> {
        let new_name = DisplayName::new(new_name.unwrap_or_default())
            .map_err(|_| UpdateUsernameError::EmptyName)?;

        let mut lobby = self.repository.lock().await;

        let current = lobby
            .registry
            .get(connection_id)
            .ok_or(UpdateUsernameError::NotJoined)?;
        if current.display_name == new_name {
            return Err(UpdateUsernameError::Unchanged);
        }
        let old_name = current.display_name.clone();

        let renamed = lobby
            .registry
            .rename(connection_id, new_name)
            .map_err(|_| UpdateUsernameError::NotJoined)?;
        tracing::info!("'{}' is now '{}'", old_name, renamed.display_name);

        broadcast_or_warn(
            self.message_pusher.as_ref(),
            &LobbyEvent::PlayersList(lobby.registry.snapshot()),
        )
        .await;

        Ok(renamed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lobby, Timestamp};
    use crate::usecase::test_support::{RecordingPusher, conn};

    fn create_usecase() -> (
        UpdateUsernameUseCase,
        InMemoryLobbyRepository,
        Arc<RecordingPusher>,
    ) {
        let mut lobby = Lobby::new();
        lobby
            .registry
            .register(conn("a"), Some("Alice"), Timestamp::new(1000));
        let repository =
            InMemoryLobbyRepository::new(Arc::new(tokio::sync::Mutex::new(lobby)));
        let pusher = Arc::new(RecordingPusher::default());
        let usecase = UpdateUsernameUseCase::new(repository.clone(), pusher.clone());
        (usecase, repository, pusher)
    }

    #[tokio::test]
    async fn test_rename_broadcasts_players_list_only() {
        // テスト項目: 名前を変更すると参加者リストだけが全員に送られる
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();

        // when (操作):
        let renamed = usecase.execute(&conn("a"), Some("  Alicia ")).await.unwrap();

        // then (期待する結果):
        assert_eq!(renamed.display_name.as_str(), "Alicia");
        assert_eq!(renamed.joined_at, Timestamp::new(1000));
        assert_eq!(
            pusher.broadcasts(),
            vec![LobbyEvent::PlayersList(repository.participants().await)]
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_ignored() {
        // テスト項目: 空白のみ・未指定の名前では何も起きない
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();

        // when (操作):
        let blank = usecase.execute(&conn("a"), Some("   ")).await;
        let absent = usecase.execute(&conn("a"), None).await;

        // then (期待する結果):
        assert_eq!(blank, Err(UpdateUsernameError::EmptyName));
        assert_eq!(absent, Err(UpdateUsernameError::EmptyName));
        assert_eq!(repository.participants().await[0].display_name.as_str(), "Alice");
        assert!(pusher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_same_name_is_ignored() {
        // テスト項目: 現在と同じ名前への変更ではブロードキャストされない
        // given (前提条件):
        let (usecase, _repository, pusher) = create_usecase();

        // when (操作):
        let result = usecase.execute(&conn("a"), Some("Alice")).await;

        // then (期待する結果):
        assert_eq!(result, Err(UpdateUsernameError::Unchanged));
        assert!(pusher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_rename_before_join_is_ignored() {
        // テスト項目: 未参加の接続からの名前変更は無視される
        // given (前提条件):
        let (usecase, repository, pusher) = create_usecase();

        // when (操作):
        let result = usecase.execute(&conn("stranger"), Some("Mallory")).await;

        // then (期待する結果):
        assert_eq!(result, Err(UpdateUsernameError::NotJoined));
        assert_eq!(repository.count_participants().await, 1);
        assert!(pusher.sent().is_empty());
    }
}
