//! Conversion logic between DTOs and domain types.

use crate::domain::{ChatEvent, ClientEvent, LobbyEvent, Participant};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for ClientEvent {
    fn from(msg: dto::ClientMessage) -> Self {
        match msg {
            dto::ClientMessage::JoinLobby { username } => Self::JoinLobby {
                requested_name: username,
            },
            dto::ClientMessage::UpdateUsername { username } => Self::UpdateUsername {
                new_name: username,
            },
            // 送信者名とタイムスタンプはサーバー側で決めるため捨てる
            dto::ClientMessage::ChatMessage { message, .. } => Self::ChatMessage { text: message },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Participant> for dto::PlayerInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.connection_id.as_str().to_string(),
            username: participant.display_name.as_str().to_string(),
            joined_at: participant.joined_at.value(),
        }
    }
}

impl From<&ChatEvent> for dto::ServerMessage {
    fn from(event: &ChatEvent) -> Self {
        Self::ChatMessage {
            username: event.display_name.as_str().to_string(),
            message: event.text.as_str().to_string(),
            timestamp: event.timestamp.value(),
        }
    }
}

impl From<&LobbyEvent> for dto::ServerMessage {
    fn from(event: &LobbyEvent) -> Self {
        match event {
            LobbyEvent::PlayersList(players) => Self::PlayersList {
                players: players.iter().map(dto::PlayerInfo::from).collect(),
            },
            LobbyEvent::ChatMessage(chat) => Self::from(chat),
            LobbyEvent::UserJoined(name) => Self::UserJoined {
                username: name.as_str().to_string(),
            },
            LobbyEvent::UserLeft(name) => Self::UserLeft {
                username: name.as_str().to_string(),
            },
            LobbyEvent::ChatHistoryCleared => Self::ChatHistoryCleared,
            LobbyEvent::ContractUpdated => Self::ContractUpdated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, DisplayName, MessageText, Timestamp};

    #[test]
    fn test_chat_message_dto_to_client_event_ignores_sender_fields() {
        // テスト項目: クライアントが送ってきた username / timestamp は捨てられる
        // given (前提条件):
        let msg = dto::ClientMessage::ChatMessage {
            username: Some("Impostor".to_string()),
            message: Some("hi".to_string()),
            timestamp: Some(42),
        };

        // when (操作):
        let event: ClientEvent = msg.into();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::ChatMessage {
                text: Some("hi".to_string())
            }
        );
    }

    #[test]
    fn test_rename_dto_to_client_event() {
        // テスト項目: updateUsername が UpdateUsername イベントに変換される
        // given (前提条件):
        let msg = dto::ClientMessage::UpdateUsername {
            username: Some("Bob".to_string()),
        };

        // when (操作):
        let event: ClientEvent = msg.into();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::UpdateUsername {
                new_name: Some("Bob".to_string())
            }
        );
    }

    #[test]
    fn test_players_list_event_to_dto() {
        // テスト項目: 参加者スナップショットが playersList DTO に変換される
        // given (前提条件):
        let participant = Participant::new(
            ConnectionId::new("c1".to_string()).unwrap(),
            DisplayName::new("Alice").unwrap(),
            Timestamp::new(1000),
        );
        let event = LobbyEvent::PlayersList(vec![participant]);

        // when (操作):
        let msg = dto::ServerMessage::from(&event);

        // then (期待する結果):
        assert_eq!(
            msg,
            dto::ServerMessage::PlayersList {
                players: vec![dto::PlayerInfo {
                    id: "c1".to_string(),
                    username: "Alice".to_string(),
                    joined_at: 1000,
                }]
            }
        );
    }

    #[test]
    fn test_chat_event_to_dto() {
        // テスト項目: ChatEvent が chatMessage DTO に変換される
        // given (前提条件):
        let chat = ChatEvent::new(
            DisplayName::new("Alice").unwrap(),
            MessageText::new("hi").unwrap(),
            Timestamp::new(2000),
        );

        // when (操作):
        let msg = dto::ServerMessage::from(&LobbyEvent::ChatMessage(chat));

        // then (期待する結果):
        assert_eq!(
            msg,
            dto::ServerMessage::ChatMessage {
                username: "Alice".to_string(),
                message: "hi".to_string(),
                timestamp: 2000,
            }
        );
    }

    #[test]
    fn test_presence_notices_to_dto() {
        // テスト項目: userJoined / userLeft が表示名付きで変換される
        // given (前提条件):
        let name = DisplayName::new("Bob").unwrap();

        // when (操作):
        let joined = dto::ServerMessage::from(&LobbyEvent::UserJoined(name.clone()));
        let left = dto::ServerMessage::from(&LobbyEvent::UserLeft(name));

        // then (期待する結果):
        assert_eq!(
            joined,
            dto::ServerMessage::UserJoined {
                username: "Bob".to_string()
            }
        );
        assert_eq!(
            left,
            dto::ServerMessage::UserLeft {
                username: "Bob".to_string()
            }
        );
    }
}
