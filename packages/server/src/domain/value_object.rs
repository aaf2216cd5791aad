//! 値オブジェクト
//!
//! 不変条件をコンストラクタで検証する newtype 群です。
//! 一度生成できた値は常に妥当であるため、上位の層は再検証を行いません。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 未指定・空白のみの名前で参加したときの表示名
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

/// 管理 API からのシステムメッセージの送信者名
pub const SYSTEM_DISPLAY_NAME: &str = "System";

/// チャットメッセージ本文の最大文字数（バイト数ではなく文字数）
pub const MAX_MESSAGE_CHARS: usize = 500;

/// 接続 ID
///
/// サーバーが接続ごとに払い出す不透明な識別子（UUID v4）。
/// クライアントから指定されることはありません。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の文字列から ConnectionId を作成
    ///
    /// 空文字列はエラーになります。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::InvalidConnectionId);
        }
        Ok(Self(value))
    }

    /// 新しい ConnectionId を払い出す
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 表示名
///
/// 前後の空白を取り除いた、空でない文字列。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// 表示名を作成（trim 後に空ならエラー）
    pub fn new(value: &str) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 参加時の名前を解決する
    ///
    /// 未指定、または空白のみの場合は "Anonymous" になります。
    pub fn or_anonymous(requested: Option<&str>) -> Self {
        requested
            .and_then(|name| Self::new(name).ok())
            .unwrap_or_else(Self::anonymous)
    }

    pub fn anonymous() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_string())
    }

    pub fn system() -> Self {
        Self(SYSTEM_DISPLAY_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文
///
/// trim 済み・空でない・最大 500 文字。
/// 500 文字を超える入力はエラーにせず切り詰めます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: &str) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessage);
        }
        Ok(Self(trimmed.chars().take(MAX_MESSAGE_CHARS).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// 文字数（バイト数ではない）
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
