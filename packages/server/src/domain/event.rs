//! Outbound lobby events.
//!
//! The domain decides *what* every connection should be told; turning an
//! event into bytes on the wire is left to the infrastructure layer.

use super::{
    entity::{ChatEvent, Participant},
    value_object::DisplayName,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyEvent {
    /// Full presence snapshot, never a delta.
    PlayersList(Vec<Participant>),
    ChatMessage(ChatEvent),
    UserJoined(DisplayName),
    UserLeft(DisplayName),
    ChatHistoryCleared,
    ContractUpdated,
}

impl LobbyEvent {
    /// Event kind as it appears in logs and on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayersList(_) => "playersList",
            Self::ChatMessage(_) => "chatMessage",
            Self::UserJoined(_) => "userJoined",
            Self::UserLeft(_) => "userLeft",
            Self::ChatHistoryCleared => "chatHistoryCleared",
            Self::ContractUpdated => "contractUpdated",
        }
    }
}

/// Inbound event from one connection, already decoded from the wire.
///
/// Every field is optional: absent or blank input is a no-op further down,
/// never an error surfaced to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    JoinLobby { requested_name: Option<String> },
    UpdateUsername { new_name: Option<String> },
    ChatMessage { text: Option<String> },
}

impl ClientEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinLobby { .. } => "joinLobby",
            Self::UpdateUsername { .. } => "updateUsername",
            Self::ChatMessage { .. } => "chatMessage",
        }
    }
}
