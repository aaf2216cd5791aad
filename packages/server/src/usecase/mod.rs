//! UseCase layer: one struct per lobby operation, plus the controller that
//! dispatches inbound events to them.
//!
//! Every usecase that mutates the lobby holds the repository lock until its
//! broadcasts have been queued, so handlers never interleave.

mod announce_contract_updated;
mod broadcast_system_message;
mod clear_chat_history;
mod connect_client;
mod controller;
mod disconnect_client;
pub mod error;
mod get_lobby_stats;
mod join_lobby;
mod reap_idle_participants;
mod send_chat_message;
mod update_username;

#[cfg(test)]
mod test_support;

pub use announce_contract_updated::AnnounceContractUpdatedUseCase;
pub use broadcast_system_message::BroadcastSystemMessageUseCase;
pub use clear_chat_history::ClearChatHistoryUseCase;
pub use connect_client::ConnectClientUseCase;
pub use controller::LobbyController;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{BroadcastSystemMessageError, SendChatMessageError, UpdateUsernameError};
pub use get_lobby_stats::{GetLobbyStatsUseCase, LobbyStats};
pub use join_lobby::JoinLobbyUseCase;
pub use reap_idle_participants::ReapIdleParticipantsUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use update_username::UpdateUsernameUseCase;

use crate::domain::{ConnectionId, LobbyEvent, MessagePusher};

/// Broadcast, logging (not propagating) a failure.
async fn broadcast_or_warn(message_pusher: &dyn MessagePusher, event: &LobbyEvent) {
    if let Err(e) = message_pusher.broadcast(event).await {
        tracing::warn!("Failed to broadcast '{}': {}", event.kind(), e);
    }
}

/// Push to one connection, logging (not propagating) a failure.
async fn push_or_warn(
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    event: &LobbyEvent,
) {
    if let Err(e) = message_pusher.push_to(connection_id, event).await {
        tracing::warn!(
            "Failed to push '{}' to '{}': {}",
            event.kind(),
            connection_id,
            e
        );
    }
}
