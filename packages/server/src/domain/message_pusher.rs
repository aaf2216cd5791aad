//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェース（Broadcast Channel）。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 配送の約束
//!
//! - fire-and-forget：受信確認は追跡しない
//! - 1 つの接続への送信失敗が他の接続への送信を妨げない
//! - 同じ接続に対しては送信した順に届く（接続ごとの FIFO）
//! - 接続ごとのキューは有限で、溢れた接続は配送先から外される

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::LobbyEvent, value_object::ConnectionId};

/// 接続ごとの送信キューの既定の長さ
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// クライアントへの送信チャンネル（シリアライズ済みのテキストフレーム）
pub type PusherChannel = mpsc::Sender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を配送先として登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を配送先から外す
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にだけ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &LobbyEvent,
    ) -> Result<(), MessagePushError>;

    /// 登録中の全接続に送信
    ///
    /// 個別の失敗はログに残すだけで、戻り値はシリアライズに失敗した場合のみエラー。
    async fn broadcast(&self, event: &LobbyEvent) -> Result<(), MessagePushError>;
}
