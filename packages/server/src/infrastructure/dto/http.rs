//! Admin HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Body of admin requests that only carry the shared key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminKeyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

/// Body of `POST /api/broadcast-message`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastMessageRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Uniform admin response: `{success, message}` or `{success, error}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Response of `GET /api/lobby-stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyStatsDto {
    pub connected_players: usize,
    pub chat_messages: usize,
    pub players: Vec<PlayerStatDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatDto {
    pub username: String,
    pub joined_at: i64,
}
