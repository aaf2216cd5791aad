//! エンティティ

use super::value_object::{ConnectionId, DisplayName, MessageText, Timestamp};

/// ロビーの参加者
///
/// Session Registry だけが所有し、接続 ID ごとに 1 レコード。
/// 変更されるのは表示名のみ（rename）で、参加時刻は保持されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            display_name,
            joined_at,
        }
    }
}

/// チャットイベント（生成後は不変）
///
/// 送信時点の表示名を値としてコピーして持つため、
/// 後からの rename は履歴に影響しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub display_name: DisplayName,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl ChatEvent {
    pub fn new(display_name: DisplayName, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            display_name,
            text,
            timestamp,
        }
    }
}
