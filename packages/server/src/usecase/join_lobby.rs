//! UseCase: ロビーへの参加（joinLobby）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinLobbyUseCase::execute() メソッド
//! - 参加者の登録と、参加者本人・全員への通知の順序
//!
//! ### なぜこのテストが必要か
//! - 新規参加者は「参加者リスト → 履歴（1 件ずつ、古い順）」の順で受け取る必要がある
//! - その後に全員へ参加者リストと userJoined が届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のロビーへの参加、履歴があるロビーへの参加
//! - エッジケース：名前なしの参加、同じ接続からの再参加

use std::sync::Arc;

use lobby_shared::time::Clock;

use crate::{
    domain::{ConnectionId, LobbyEvent, MessagePusher, Participant, Timestamp},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::{broadcast_or_warn, push_or_warn};

/// ロビー参加のユースケース
pub struct JoinLobbyUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinLobbyUseCase {
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

    /// ロビー参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `requested_name` - 希望する表示名（未指定・空白なら "Anonymous"）
    ///
    /// # Returns
    ///
    /// 登録された参加者レコード
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        requested_name: Option<&str>,
    ) -> Participant {
        let mut lobby = self.repository.lock().await;

        let joined_at = Timestamp::new(self.clock.now_millis());
        let participant = lobby
            .registry
            .register(connection_id.clone(), requested_name, joined_at);
        let players = lobby.registry.snapshot();
        tracing::info!(
            "'{}' joined the lobby (total: {})",
            participant.display_name,
            players.len()
        );

        // 1. 参加者本人へ：参加者リスト、続けて履歴を 1 件ずつ古い順に
        let pusher = self.message_pusher.as_ref();
        push_or_warn(
            pusher,
            connection_id,
            &LobbyEvent::PlayersList(players.clone()),
        )
        .await;
        let history = lobby.history.snapshot();
        if !history.is_empty() {
            tracing::debug!(
                "Replaying {} chat messages to '{}'",
                history.len(),
                connection_id
            );
        }
        for chat in history {
            push_or_warn(pusher, connection_id, &LobbyEvent::ChatMessage(chat)).await;
        }

        // 2. 全員へ（本人を含む）：参加者リストと参加通知
        broadcast_or_warn(pusher, &LobbyEvent::PlayersList(players)).await;
        broadcast_or_warn(
            pusher,
            &LobbyEvent::UserJoined(participant.display_name.clone()),
        )
        .await;

        participant
    }
}
