//! InMemory Lobby Repository 実装
//!
//! `Lobby` 集約を 1 つの `tokio::sync::Mutex` の中に保持します。
//!
//! ## 排他制御
//!
//! UseCase は `lock()` で得たガードを「変更 → ブロードキャスト」が終わるまで保持します。
//! これによりハンドラ同士（および Presence Reaper）の処理は直列化され、
//! 古い参加者スナップショットが新しいものを追い越すことはありません。
//! ロックの取得順は常に「Lobby → MessagePusher のクライアントマップ」です。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ChatEvent, Lobby, Participant};

/// インメモリ Lobby Repository 実装
#[derive(Clone, Default)]
pub struct InMemoryLobbyRepository {
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }

    /// 履歴容量を指定して空の Lobby から作成
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self::new(Arc::new(Mutex::new(Lobby::with_history_capacity(capacity))))
    }

    /// Lobby の排他ロックを取得
    pub async fn lock(&self) -> MutexGuard<'_, Lobby> {
        self.lobby.lock().await
    }

    /// 参加者のスナップショット（読み取り専用）
    pub async fn participants(&self) -> Vec<Participant> {
        self.lobby.lock().await.registry.snapshot()
    }

    /// 履歴のスナップショット（読み取り専用）
    pub async fn history(&self) -> Vec<ChatEvent> {
        self.lobby.lock().await.history.snapshot()
    }

    /// 参加中の接続数
    pub async fn count_participants(&self) -> usize {
        self.lobby.lock().await.registry.count()
    }
}
