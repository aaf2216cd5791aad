//! Lobby Controller
//!
//! Owns one instance of every usecase and routes inbound connection events to
//! them. The transport layer only ever talks to this type.
//!
//! Per connection the lifecycle is
//! `Connected-NotJoined -> Joined -> (Renamed)* -> Disconnected`; whether a
//! connection is "Joined" is decided by the registry alone.

use std::{sync::Arc, time::Duration};

use lobby_shared::time::Clock;

use crate::{
    domain::{ChatEvent, ClientEvent, ConnectionId, MessagePusher, Participant, PusherChannel},
    infrastructure::repository::InMemoryLobbyRepository,
};

use super::{
    AnnounceContractUpdatedUseCase, BroadcastSystemMessageError, BroadcastSystemMessageUseCase,
    ClearChatHistoryUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetLobbyStatsUseCase,
    JoinLobbyUseCase, LobbyStats, ReapIdleParticipantsUseCase, SendChatMessageUseCase,
    UpdateUsernameUseCase,
};

pub struct LobbyController {
    connect_client_usecase: ConnectClientUseCase,
    join_lobby_usecase: JoinLobbyUseCase,
    update_username_usecase: UpdateUsernameUseCase,
    send_chat_message_usecase: SendChatMessageUseCase,
    disconnect_client_usecase: DisconnectClientUseCase,
    reap_idle_participants_usecase: ReapIdleParticipantsUseCase,
    clear_chat_history_usecase: ClearChatHistoryUseCase,
    broadcast_system_message_usecase: BroadcastSystemMessageUseCase,
    announce_contract_updated_usecase: AnnounceContractUpdatedUseCase,
    get_lobby_stats_usecase: GetLobbyStatsUseCase,
}

impl LobbyController {
    /// Wire every usecase against the same repository, pusher and clock.
    ///
    /// # Arguments
    ///
    /// * `repository` - Holder of the shared `Lobby` aggregate
    /// * `message_pusher` - Delivery to connected clients
    /// * `clock` - Source of join and chat timestamps
    /// * `idle_timeout` - Age after which the reaper removes a participant
    pub fn new(
        repository: InMemoryLobbyRepository,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            connect_client_usecase: ConnectClientUseCase::new(message_pusher.clone()),
            join_lobby_usecase: JoinLobbyUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            update_username_usecase: UpdateUsernameUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            send_chat_message_usecase: SendChatMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            disconnect_client_usecase: DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            reap_idle_participants_usecase: ReapIdleParticipantsUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                idle_timeout,
            ),
            clear_chat_history_usecase: ClearChatHistoryUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            broadcast_system_message_usecase: BroadcastSystemMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            announce_contract_updated_usecase: AnnounceContractUpdatedUseCase::new(
                repository.clone(),
                message_pusher,
            ),
            get_lobby_stats_usecase: GetLobbyStatsUseCase::new(repository),
        }
    }

    /// Accept a new connection and return its freshly assigned id.
    pub async fn connect(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = self.connect_client_usecase.execute(sender).await;
        tracing::info!("Connection '{}' opened", connection_id);
        connection_id
    }

    /// Apply one inbound event from `connection_id`.
    ///
    /// Rejected events are logged and otherwise ignored; nothing is ever sent
    /// back to the client about them.
    pub async fn handle(&self, connection_id: &ConnectionId, event: ClientEvent) {
        let kind = event.kind();
        match event {
            ClientEvent::JoinLobby { requested_name } => {
                self.join_lobby_usecase
                    .execute(connection_id, requested_name.as_deref())
                    .await;
            }
            ClientEvent::UpdateUsername { new_name } => {
                if let Err(e) = self
                    .update_username_usecase
                    .execute(connection_id, new_name.as_deref())
                    .await
                {
                    tracing::debug!("Ignored '{}' from '{}': {}", kind, connection_id, e);
                }
            }
            ClientEvent::ChatMessage { text } => {
                if let Err(e) = self
                    .send_chat_message_usecase
                    .execute(connection_id, text.as_deref())
                    .await
                {
                    tracing::debug!("Ignored '{}' from '{}': {}", kind, connection_id, e);
                }
            }
        }
    }

    /// Tear down a connection for any reason (close frame, error, drop).
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let removed = self.disconnect_client_usecase.execute(connection_id).await;
        tracing::info!("Connection '{}' closed", connection_id);
        removed
    }

    /// One presence reaper sweep.
    pub async fn reap_idle(&self) -> Vec<Participant> {
        self.reap_idle_participants_usecase.execute().await
    }

    pub async fn clear_history(&self) -> usize {
        self.clear_chat_history_usecase.execute().await
    }

    pub async fn broadcast_system_message(
        &self,
        text: Option<&str>,
    ) -> Result<ChatEvent, BroadcastSystemMessageError> {
        self.broadcast_system_message_usecase.execute(text).await
    }

    pub async fn announce_contract_updated(&self) {
        self.announce_contract_updated_usecase.execute().await
    }

    pub async fn stats(&self) -> LobbyStats {
        self.get_lobby_stats_usecase.execute().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, LobbyEvent, MessageText, Timestamp};
    use crate::usecase::test_support::{RecordingPusher, Sent};
    use lobby_shared::time::ManualClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ClientEvent のディスパッチと、接続ごとの状態遷移
    //
    // 【なぜこのテストが必要か】
    // - 各 UseCase を組み合わせたときの通知の順序と内容を保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. Alice と Bob の参加・チャット・切断
    // 2. 未参加の接続からのチャット
    // 3. 名前の変更
    // 4. 多数の接続の操作と回収が並行しても、最終状態と最後の通知が一致する
    // ========================================

    fn create_controller() -> (LobbyController, Arc<RecordingPusher>, Arc<ManualClock>) {
        let pusher = Arc::new(RecordingPusher::default());
        let clock = Arc::new(ManualClock::new(1_000));
        let controller = LobbyController::new(
            InMemoryLobbyRepository::default(),
            pusher.clone(),
            clock.clone(),
            Duration::from_secs(30 * 60),
        );
        (controller, pusher, clock)
    }

    async fn connect(controller: &LobbyController) -> ConnectionId {
        let (tx, _rx) = tokio::sync::mpsc::channel(16);
        controller.connect(tx).await
    }

    fn join(name: &str) -> ClientEvent {
        ClientEvent::JoinLobby {
            requested_name: Some(name.to_string()),
        }
    }

    fn chat(text: &str) -> ClientEvent {
        ClientEvent::ChatMessage {
            text: Some(text.to_string()),
        }
    }

    fn names(players: &[Participant]) -> Vec<&str> {
        players.iter().map(|p| p.display_name.as_str()).collect()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_alice_and_bob_scenario() {
        // テスト項目: 参加・チャット・切断の一連の流れで正しい通知が届く
        // given (前提条件):
        let (controller, pusher, clock) = create_controller();
        let a = connect(&controller).await;
        let b = connect(&controller).await;

        // when (操作): A が Alice として参加
        controller.handle(&a, join("Alice")).await;

        // then (期待する結果): A に [Alice] が届き、全員に [Alice] と userJoined{Alice}
        let sent = pusher.sent();
        assert!(matches!(&sent[0], Sent::To(id, LobbyEvent::PlayersList(p)) if *id == a && names(p) == ["Alice"]));
        assert!(matches!(&sent[1], Sent::Broadcast(LobbyEvent::PlayersList(p)) if names(p) == ["Alice"]));
        assert_eq!(sent[2], Sent::Broadcast(LobbyEvent::UserJoined(name("Alice"))));
        pusher.clear();

        // when (操作): B が Bob として参加
        controller.handle(&b, join("Bob")).await;

        // then (期待する結果): 全員に [Alice, Bob] と userJoined{Bob}
        let broadcasts = pusher.broadcasts();
        assert!(matches!(&broadcasts[0], LobbyEvent::PlayersList(p) if names(p) == ["Alice", "Bob"]));
        assert_eq!(broadcasts[1], LobbyEvent::UserJoined(name("Bob")));
        pusher.clear();

        // when (操作): A が "hi" を送信
        clock.advance(500);
        controller.handle(&a, chat("hi")).await;

        // then (期待する結果): 全員に Alice 名義の "hi" が届く
        assert_eq!(
            pusher.broadcasts(),
            vec![LobbyEvent::ChatMessage(ChatEvent::new(
                name("Alice"),
                MessageText::new("hi").unwrap(),
                Timestamp::new(1_500),
            ))]
        );
        pusher.clear();

        // when (操作): A が切断
        controller.disconnect(&a).await;

        // then (期待する結果): [Bob] と userLeft{Alice} が届く
        let broadcasts = pusher.broadcasts();
        assert!(matches!(&broadcasts[0], LobbyEvent::PlayersList(p) if names(p) == ["Bob"]));
        assert_eq!(broadcasts[1], LobbyEvent::UserLeft(name("Alice")));
        assert_eq!(controller.stats().await.connected_players, 1);
    }

    #[tokio::test]
    async fn test_chat_before_join_is_noop() {
        // テスト項目: 参加前のチャットは何も起こさない
        // given (前提条件):
        let (controller, pusher, _clock) = create_controller();
        let a = connect(&controller).await;

        // when (操作):
        controller.handle(&a, chat("hello?")).await;

        // then (期待する結果):
        assert!(pusher.sent().is_empty());
        assert_eq!(controller.stats().await.chat_messages, 0);
    }

    #[tokio::test]
    async fn test_rename_then_chat_uses_new_name() {
        // テスト項目: 名前変更後のチャットは新しい名前で送られ、以前の履歴は変わらない
        // given (前提条件):
        let (controller, pusher, _clock) = create_controller();
        let a = connect(&controller).await;
        controller.handle(&a, join("Alice")).await;
        controller.handle(&a, chat("before")).await;

        // when (操作):
        controller
            .handle(
                &a,
                ClientEvent::UpdateUsername {
                    new_name: Some("Alicia".to_string()),
                },
            )
            .await;
        pusher.clear();
        controller.handle(&a, chat("after")).await;

        // then (期待する結果):
        assert!(matches!(
            &pusher.broadcasts()[0],
            LobbyEvent::ChatMessage(event) if event.display_name.as_str() == "Alicia"
        ));
        let stats = controller.stats().await;
        assert_eq!(stats.chat_messages, 2);
        assert_eq!(names(&stats.players), vec!["Alicia"]);
    }

    #[tokio::test]
    async fn test_disconnect_without_join_is_silent() {
        // テスト項目: 参加せずに切断した接続については何も通知されない
        // given (前提条件):
        let (controller, pusher, _clock) = create_controller();
        let a = connect(&controller).await;

        // when (操作):
        let removed = controller.disconnect(&a).await;

        // then (期待する結果):
        assert_eq!(removed, None);
        assert!(pusher.sent().is_empty());
        assert!(pusher.registered().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_handlers_and_reaper_stay_consistent() {
        // テスト項目: 参加・改名・チャット・切断と回収が並行しても、状態と通知が食い違わない
        // given (前提条件):
        const TASKS: usize = 200;
        let (controller, pusher, clock) = create_controller();
        let controller = Arc::new(controller);

        // when (操作): 偶数番は最後に切断し、7 の倍数番は回収も走らせる
        let handles: Vec<_> = (0..TASKS)
            .map(|i| {
                let controller = controller.clone();
                tokio::spawn(async move {
                    let id = connect(&controller).await;
                    controller.handle(&id, join(&format!("p{}", i))).await;
                    controller
                        .handle(
                            &id,
                            ClientEvent::UpdateUsername {
                                new_name: Some(format!("player-{}", i)),
                            },
                        )
                        .await;
                    controller.handle(&id, chat(&format!("hello from {}", i))).await;
                    if i % 7 == 0 {
                        controller.reap_idle().await;
                    }
                    if i % 2 == 0 {
                        controller.disconnect(&id).await;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): 奇数番だけが残り、最後の playersList が最終状態と一致する
        let stats = controller.stats().await;
        assert_eq!(stats.connected_players, TASKS / 2);
        assert_eq!(stats.chat_messages, 50);
        let mut remaining: Vec<String> = stats
            .players
            .iter()
            .map(|p| p.display_name.as_str().to_string())
            .collect();
        remaining.sort();
        let mut expected: Vec<String> = (0..TASKS)
            .filter(|i| i % 2 == 1)
            .map(|i| format!("player-{}", i))
            .collect();
        expected.sort();
        assert_eq!(remaining, expected);

        let last_snapshot = pusher
            .broadcasts()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                LobbyEvent::PlayersList(players) => Some(players),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_snapshot, stats.players);

        // when (操作): 31 分経過してから回収
        clock.advance(31 * 60 * 1000);
        let reaped = controller.reap_idle().await;

        // then (期待する結果): 残っていた全員が回収される
        assert_eq!(reaped.len(), TASKS / 2);
        assert_eq!(controller.stats().await.connected_players, 0);
    }
}
