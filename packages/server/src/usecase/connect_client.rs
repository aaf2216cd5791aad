//! UseCase: 接続の受付
//!
//! 新しい接続に ConnectionId を払い出し、配送先として登録します。
//! この時点ではまだロビーに参加していない（Connected-NotJoined）状態で、
//! ブロードキャストは受け取りますが参加者リストには載りません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        connection_id
    }
}
