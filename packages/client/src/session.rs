//! WebSocket client session management.
//!
//! A session is one WebSocket connection: it joins under the remembered name,
//! prints everything the server sends, and forwards user input until either
//! side ends it.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use lobby_server::infrastructure::dto::websocket::{ClientMessage, PlayerInfo, ServerMessage};
use lobby_shared::time::get_timestamp_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{UserInput, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// State that outlives a single connection
#[derive(Debug, Default)]
pub struct ClientState {
    /// Name sent with `joinLobby` on every (re)connect
    name: Mutex<String>,
    /// Mirror of the last `playersList` received
    players: Mutex<Vec<PlayerInfo>>,
}

impl ClientState {
    pub fn new(name: String) -> Self {
        Self {
            name: Mutex::new(name),
            players: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> String {
        self.name.lock().map(|n| n.clone()).unwrap_or_default()
    }

    fn set_name(&self, name: String) {
        if let Ok(mut current) = self.name.lock() {
            *current = name;
        }
    }

    fn players(&self) -> Vec<PlayerInfo> {
        self.players.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn set_players(&self, players: Vec<PlayerInfo>) {
        if let Ok(mut current) = self.players.lock() {
            *current = players;
        }
    }
}

/// Update the local mirror from one server message and return what to print.
fn apply_server_message(state: &ClientState, msg: ServerMessage) -> String {
    match msg {
        ServerMessage::PlayersList { players } => {
            let formatted = MessageFormatter::format_players_list(&players, &state.name());
            state.set_players(players);
            formatted
        }
        ServerMessage::ChatMessage {
            username,
            message,
            timestamp,
        } => MessageFormatter::format_chat_message(&username, &message, timestamp),
        ServerMessage::UserJoined { username } => MessageFormatter::format_user_joined(&username),
        ServerMessage::UserLeft { username } => MessageFormatter::format_user_left(&username),
        ServerMessage::ChatHistoryCleared => MessageFormatter::format_history_cleared(),
        ServerMessage::ContractUpdated => MessageFormatter::format_contract_updated(),
    }
}

fn encode(msg: &ClientMessage) -> Result<Message, ClientError> {
    serde_json::to_string(msg)
        .map(|json| Message::Text(json.into()))
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize message: {}", e)))
}

/// Run one WebSocket client session
///
/// # Returns
///
/// * `Ok(())` - The user ended the session (`/quit`, Ctrl+C or end of input)
/// * `Err(ClientError)` - The connection could not be made or was lost
pub async fn run_client_session(
    url: &str,
    state: &Arc<ClientState>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => ClientError::InvalidUrl(e.to_string()),
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to lobby server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /name <new name> renames, /players lists players, /quit exits.\n",
        state.name()
    );

    let (mut write, mut read) = ws_stream.split();

    // Join (or rejoin) under the remembered name
    let join = ClientMessage::JoinLobby {
        username: Some(state.name()),
    };
    write
        .send(encode(&join)?)
        .await
        .map_err(|_| ClientError::ConnectionLost)?;

    // Spawn a task to handle incoming messages
    let state_for_read = state.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                    Ok(msg) => apply_server_message(&state_for_read, msg),
                    Err(_) => MessageFormatter::format_raw_message(&text),
                },
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&state_for_read.name());
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost);
            }
            line = input_rx.recv() => {
                // Input closed: the user pressed Ctrl+C or Ctrl+D
                let Some(line) = line else {
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };

                let outgoing = match parse_input(&line) {
                    None => continue,
                    Some(UserInput::Chat(message)) => ClientMessage::ChatMessage {
                        username: Some(state.name()),
                        message: Some(message),
                        timestamp: Some(get_timestamp_millis()),
                    },
                    Some(UserInput::Rename(new_name)) => {
                        state.set_name(new_name.clone());
                        ClientMessage::UpdateUsername {
                            username: Some(new_name),
                        }
                    }
                    Some(UserInput::ShowPlayers) => {
                        print!(
                            "{}",
                            MessageFormatter::format_players_list(&state.players(), &state.name())
                        );
                        redisplay_prompt(&state.name());
                        continue;
                    }
                    Some(UserInput::Quit) => {
                        read_task.abort();
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Some(UserInput::Unknown(command)) => {
                        print!("{}", MessageFormatter::format_unknown_command(&command));
                        redisplay_prompt(&state.name());
                        continue;
                    }
                };

                if let Err(e) = write.send(encode(&outgoing)?).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionLost);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(username: &str) -> PlayerInfo {
        PlayerInfo {
            id: format!("id-{}", username),
            username: username.to_string(),
            joined_at: 0,
        }
    }

    #[test]
    fn test_players_list_updates_mirror() {
        // テスト項目: playersList を受け取ると手元の参加者リストが置き換わる
        // given (前提条件):
        let state = ClientState::new("alice".to_string());
        state.set_players(vec![player("old")]);

        // when (操作):
        let output = apply_server_message(
            &state,
            ServerMessage::PlayersList {
                players: vec![player("alice"), player("bob")],
            },
        );

        // then (期待する結果):
        assert_eq!(state.players(), vec![player("alice"), player("bob")]);
        assert!(output.contains("alice (me)"));
    }

    #[test]
    fn test_other_messages_leave_mirror_untouched() {
        // テスト項目: playersList 以外のメッセージでは参加者リストは変わらない
        // given (前提条件):
        let state = ClientState::new("alice".to_string());
        state.set_players(vec![player("alice")]);

        // when (操作):
        let output = apply_server_message(
            &state,
            ServerMessage::UserLeft {
                username: "bob".to_string(),
            },
        );

        // then (期待する結果):
        assert_eq!(state.players(), vec![player("alice")]);
        assert!(output.contains("- bob left"));
    }

    #[test]
    fn test_rename_is_remembered() {
        // テスト項目: 名前を変更すると、再接続時に使う名前も更新される
        // given (前提条件):
        let state = ClientState::new("alice".to_string());

        // when (操作):
        state.set_name("alicia".to_string());

        // then (期待する結果):
        assert_eq!(state.name(), "alicia");
    }

    #[test]
    fn test_encode_join_lobby() {
        // テスト項目: joinLobby が type 付きの JSON として送られる
        // given (前提条件):
        let msg = ClientMessage::JoinLobby {
            username: Some("alice".to_string()),
        };

        // when (操作):
        let encoded = encode(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            encoded,
            Message::Text(r#"{"type":"joinLobby","username":"alice"}"#.into())
        );
    }
}
