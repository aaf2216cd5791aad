//! Test doubles shared by the usecase tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ConnectionId, LobbyEvent, MessagePushError, MessagePusher, PusherChannel};

/// One delivery recorded by `RecordingPusher`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    To(ConnectionId, LobbyEvent),
    Broadcast(LobbyEvent),
}

/// MessagePusher that records every delivery instead of sending it
#[derive(Default)]
pub struct RecordingPusher {
    sent: Mutex<Vec<Sent>>,
    registered: Mutex<Vec<ConnectionId>>,
}

impl RecordingPusher {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<LobbyEvent> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Broadcast(event) => Some(event),
                Sent::To(..) => None,
            })
            .collect()
    }

    pub fn registered(&self) -> Vec<ConnectionId> {
        self.registered.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().unwrap().push(connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.registered
            .lock()
            .unwrap()
            .retain(|id| id != connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &LobbyEvent,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::To(connection_id.clone(), event.clone()));
        Ok(())
    }

    async fn broadcast(&self, event: &LobbyEvent) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Broadcast(event.clone()));
        Ok(())
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}
