//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::LobbyController;

/// Shared application state
pub struct AppState {
    /// LobbyController（全 UseCase の入口）
    pub controller: Arc<LobbyController>,
    /// 管理 API の共有キー
    pub admin_key: String,
    /// 接続ごとの送信キューの長さ
    pub queue_capacity: usize,
}
