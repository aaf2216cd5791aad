//! Read-only HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{LobbyStatsDto, PlayerStatDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current lobby population and history size
pub async fn lobby_stats(State(state): State<Arc<AppState>>) -> Json<LobbyStatsDto> {
    let stats = state.controller.stats().await;

    // Domain Model から DTO への変換
    let dto = LobbyStatsDto {
        connected_players: stats.connected_players,
        chat_messages: stats.chat_messages,
        players: stats
            .players
            .iter()
            .map(|p| PlayerStatDto {
                username: p.display_name.as_str().to_string(),
                joined_at: p.joined_at.value(),
            })
            .collect(),
    };

    Json(dto)
}
