//! UseCase 層のエラー型
//!
//! いずれもクライアントには返さず、UI 層でログに残すだけのものです
//! （`BroadcastSystemMessageError` のみ管理 API のレスポンスになる）。

use thiserror::Error;

/// 表示名変更の不成立理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateUsernameError {
    #[error("new name is blank")]
    EmptyName,

    #[error("name is unchanged")]
    Unchanged,

    #[error("connection has not joined the lobby")]
    NotJoined,
}

/// チャット送信の不成立理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendChatMessageError {
    #[error("message is blank")]
    EmptyMessage,

    #[error("connection has not joined the lobby")]
    NotJoined,
}

/// システムメッセージ送信の不成立理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastSystemMessageError {
    #[error("message is blank")]
    EmptyMessage,
}
