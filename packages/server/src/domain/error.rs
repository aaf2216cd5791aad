//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("display name must not be blank")]
    EmptyDisplayName,

    #[error("message must not be blank")]
    EmptyMessage,

    #[error("connection id must not be blank")]
    InvalidConnectionId,
}

/// Session Registry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 指定した接続の参加者レコードが存在しない（未参加、または切断・回収済み）
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// 送信キューが満杯（その接続は配送先から外される）
    #[error("outbound queue of client '{0}' is full")]
    QueueFull(String),

    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
