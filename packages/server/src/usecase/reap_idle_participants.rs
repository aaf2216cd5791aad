//! UseCase: 長時間参加者の回収（Presence Reaper の 1 回分）
//!
//! 参加時刻から `idle_timeout` を超えた参加者をレジストリから削除します。
//! 接続そのものは閉じないので、回収された接続は joinLobby で再参加できます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReapIdleParticipantsUseCase::execute() メソッド
//! - 回収対象の判定（参加時刻基準・境界値）と通知の順序
//!
//! ### なぜこのテストが必要か
//! - 30 分ちょうどの参加者は残り、31 分の参加者は回収される
//! - 回収後は参加者リスト 1 回、続けて回収者ごとの userLeft が届く
//!
//! ### どのような状況を想定しているか
//! - 正常系：一部だけ回収される
//! - エッジケース：回収対象なし（何も送らない）、回収後の再参加

use std::{sync::Arc, time::Duration};

use lobby_shared::time::Clock;

use crate::{
    domain::{LobbyEvent, MessagePusher, Participant, Timestamp},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::broadcast_or_warn;

/// 長時間参加者回収のユースケース
pub struct ReapIdleParticipantsUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    idle_timeout: Duration,
}

impl ReapIdleParticipantsUseCase {
    pub fn new(
        repository: InMemoryLobbyRepository,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            idle_timeout,
        }
    }

    /// 回収を 1 回実行
    ///
    /// # Returns
    ///
    /// 回収された参加者（レジストリの順）
    pub async fn execute(&self) -> Vec<Participant> {
        let mut lobby = self.repository.lock().await;

        let now = Timestamp::new(self.clock.now_millis());
        let timeout_millis = i64::try_from(self.idle_timeout.as_millis()).unwrap_or(i64::MAX);
        let reaped = lobby.reap_idle(now, timeout_millis);
        if reaped.is_empty() {
            return reaped;
        }

        tracing::info!(
            "Reaped {} participants joined more than {}s ago (remaining: {})",
            reaped.len(),
            self.idle_timeout.as_secs(),
            lobby.registry.count()
        );

        let pusher = self.message_pusher.as_ref();
        broadcast_or_warn(pusher, &LobbyEvent::PlayersList(lobby.registry.snapshot())).await;
        for participant in &reaped {
            broadcast_or_warn(
                pusher,
                &LobbyEvent::UserLeft(participant.display_name.clone()),
            )
            .await;
        }

        reaped
    }
}
