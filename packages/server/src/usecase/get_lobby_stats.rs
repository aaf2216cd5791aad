//! UseCase: ロビーの統計情報（管理 API 用の読み取り専用操作）

use crate::{domain::Participant, infrastructure::repository::InMemoryLobbyRepository};

/// ある時点のロビーの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyStats {
    pub connected_players: usize,
    pub chat_messages: usize,
    pub players: Vec<Participant>,
}

pub struct GetLobbyStatsUseCase {
    repository: InMemoryLobbyRepository,
}

impl GetLobbyStatsUseCase {
    pub fn new(repository: InMemoryLobbyRepository) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> LobbyStats {
        let lobby = self.repository.lock().await;
        LobbyStats {
            connected_players: lobby.registry.count(),
            chat_messages: lobby.history.len(),
            players: lobby.registry.snapshot(),
        }
    }
}
