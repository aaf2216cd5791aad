//! UseCase: 契約更新の通知（管理操作）
//!
//! 契約データそのものはサーバーの外で管理されており、
//! ここでは再取得を促す contractUpdated を全員に送るだけです。

use std::sync::Arc;

use crate::{
    domain::{LobbyEvent, MessagePusher},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::broadcast_or_warn;

pub struct AnnounceContractUpdatedUseCase {
    repository: InMemoryLobbyRepository,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AnnounceContractUpdatedUseCase {
    pub fn new(repository: InMemoryLobbyRepository, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self) {
        let _lobby = self.repository.lock().await;
        tracing::info!("Announcing contract update");
        broadcast_or_warn(self.message_pusher.as_ref(), &LobbyEvent::ContractUpdated).await;
    }
}
