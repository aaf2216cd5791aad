//! Admin HTTP API handlers.
//!
//! Every request carries the shared key in its JSON body. A missing or
//! unparsable body is treated like an empty one, so it fails the key check
//! instead of being rejected by the extractor.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    infrastructure::dto::http::{AdminKeyRequest, AdminResponse, BroadcastMessageRequest},
    ui::state::AppState,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Invalid key")]
    Unauthorized,

    #[error("Message required")]
    MessageRequired,
}

impl AdminError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::MessageRequired => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        (self.status(), Json(AdminResponse::error(self.to_string()))).into_response()
    }
}

fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

fn authorize(state: &AppState, key: Option<&str>) -> Result<(), AdminError> {
    if key == Some(state.admin_key.as_str()) {
        Ok(())
    } else {
        tracing::warn!("Rejected admin request with invalid key");
        Err(AdminError::Unauthorized)
    }
}

/// `POST /api/clear-chat`
pub async fn clear_chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AdminResponse>, AdminError> {
    let request: AdminKeyRequest = parse_body(&body);
    authorize(&state, request.key.as_deref())?;

    state.controller.clear_history().await;
    Ok(Json(AdminResponse::ok("Chat cleared")))
}

/// `POST /api/broadcast-message`
pub async fn broadcast_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AdminResponse>, AdminError> {
    let request: BroadcastMessageRequest = parse_body(&body);
    authorize(&state, request.key.as_deref())?;

    state
        .controller
        .broadcast_system_message(request.message.as_deref())
        .await
        .map_err(|_| AdminError::MessageRequired)?;
    Ok(Json(AdminResponse::ok("Message broadcast")))
}

/// `POST /api/contract-updated`
pub async fn announce_contract_updated(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AdminResponse>, AdminError> {
    let request: AdminKeyRequest = parse_body(&body);
    authorize(&state, request.key.as_deref())?;

    state.controller.announce_contract_updated().await;
    Ok(Json(AdminResponse::ok("Contract update broadcast")))
}
