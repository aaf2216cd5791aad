//! Message formatting utilities for client display.

use lobby_server::infrastructure::dto::websocket::PlayerInfo;
use lobby_shared::time::timestamp_to_clock_time;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the players list
    ///
    /// # Arguments
    ///
    /// * `players` - Mirrored players list, in join order
    /// * `my_name` - The name this client joined under (marked as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the players list
    pub fn format_players_list(players: &[PlayerInfo], my_name: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Players online ({}):\n", players.len()));

        if players.is_empty() {
            output.push_str("(No players)\n");
        } else {
            for player in players {
                let me_suffix = if player.username == my_name {
                    " (me)"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "{}{} - joined at {}\n",
                    player.username,
                    me_suffix,
                    timestamp_to_clock_time(player.joined_at)
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_chat_message(username: &str, message: &str, timestamp: i64) -> String {
        format!(
            "\n[{}] {}: {}\n",
            timestamp_to_clock_time(timestamp),
            username,
            message
        )
    }

    pub fn format_user_joined(username: &str) -> String {
        format!("\n+ {} joined the lobby\n", username)
    }

    pub fn format_user_left(username: &str) -> String {
        format!("\n- {} left the lobby\n", username)
    }

    pub fn format_history_cleared() -> String {
        "\n* Chat history was cleared by an administrator\n".to_string()
    }

    pub fn format_contract_updated() -> String {
        "\n* The contract was updated\n".to_string()
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    pub fn format_unknown_command(line: &str) -> String {
        format!(
            "Unknown command '{}'. Commands: /name <new name>, /players, /quit\n",
            line
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(username: &str, joined_at: i64) -> PlayerInfo {
        PlayerInfo {
            id: format!("id-{}", username),
            username: username.to_string(),
            joined_at,
        }
    }

    #[test]
    fn test_format_players_list_with_no_players() {
        // テスト項目: 参加者が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let players = vec![];

        // when (操作):
        let result = MessageFormatter::format_players_list(&players, "alice");

        // then (期待する結果):
        assert!(result.contains("Players online (0):"));
        assert!(result.contains("(No players)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_players_list_marks_me() {
        // テスト項目: 複数参加者の場合、全員が表示され自分にはマークが付く
        // given (前提条件):
        // 2023-01-01T00:00:00Z と 00:01:40Z
        let players = vec![player("alice", 1672531200000), player("bob", 1672531300000)];

        // when (操作):
        let result = MessageFormatter::format_players_list(&players, "alice");

        // then (期待する結果):
        assert!(result.contains("Players online (2):"));
        assert!(result.contains("alice (me) - joined at 00:00:00"));
        assert!(result.contains("bob - joined at 00:01:40"));
        assert!(!result.contains("bob (me)"));
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが時刻・送信者・本文の形式で表示される
        // given (前提条件):
        let timestamp = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_chat_message("alice", "Hello, world!", timestamp);

        // then (期待する結果):
        assert_eq!(result, "\n[00:00:00] alice: Hello, world!\n");
    }

    #[test]
    fn test_format_presence_notices() {
        // テスト項目: 参加・退出の通知が正しくフォーマットされる
        // given (前提条件):

        // when (操作):
        let joined = MessageFormatter::format_user_joined("bob");
        let left = MessageFormatter::format_user_left("charlie");

        // then (期待する結果):
        assert!(joined.contains("+ bob joined"));
        assert!(left.contains("- charlie left"));
    }

    #[test]
    fn test_format_raw_and_binary() {
        // テスト項目: 解釈できないメッセージも内容が分かる形で表示される
        // given (前提条件):

        // when (操作):
        let raw = MessageFormatter::format_raw_message("unknown message format");
        let binary = MessageFormatter::format_binary_message(1024);

        // then (期待する結果):
        assert!(raw.contains("Received: unknown message format"));
        assert!(binary.contains("1024 bytes"));
    }
}
