//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `"type"`.

use serde::{Deserialize, Serialize};

/// Frames sent by a client.
///
/// All fields default to `None` so that a frame with missing fields still
/// decodes; validation happens in the usecases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    JoinLobby {
        #[serde(default)]
        username: Option<String>,
    },
    UpdateUsername {
        #[serde(default)]
        username: Option<String>,
    },
    /// `username` and `timestamp` are accepted for compatibility but ignored:
    /// the server stamps the sender's current name and its own time.
    ChatMessage {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        timestamp: Option<i64>,
    },
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    PlayersList {
        players: Vec<PlayerInfo>,
    },
    ChatMessage {
        username: String,
        message: String,
        timestamp: i64,
    },
    UserJoined {
        username: String,
    },
    UserLeft {
        username: String,
    },
    ChatHistoryCleared,
    ContractUpdated,
}

/// One entry of the players list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub id: String,
    pub username: String,
    pub joined_at: i64,
}
