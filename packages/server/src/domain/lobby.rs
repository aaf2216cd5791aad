//! Lobby aggregate: the registry and the history behind one owner.

use super::{
    entity::{ChatEvent, Participant},
    error::RegistryError,
    history::HistoryBuffer,
    registry::SessionRegistry,
    value_object::{ConnectionId, MessageText, Timestamp},
};

/// The only mutable shared state of the lobby.
///
/// Kept as one value so a single lock covers both the presence set and the
/// chat history.
#[derive(Debug, Clone, Default)]
pub struct Lobby {
    pub registry: SessionRegistry,
    pub history: HistoryBuffer,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            registry: SessionRegistry::new(),
            history: HistoryBuffer::with_capacity(capacity),
        }
    }

    /// Record a chat message from a joined participant.
    ///
    /// The sender's current display name is copied into the event. Fails
    /// with `ParticipantNotFound` when the connection has not joined (or was
    /// already reaped); history is untouched in that case.
    pub fn post_chat(
        &mut self,
        connection_id: &ConnectionId,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Result<ChatEvent, RegistryError> {
        let sender = self
            .registry
            .get(connection_id)
            .ok_or_else(|| RegistryError::ParticipantNotFound(connection_id.to_string()))?;

        let event = ChatEvent::new(sender.display_name.clone(), text, timestamp);
        self.history.append(event.clone());
        Ok(event)
    }

    /// Remove every participant whose age at `now` exceeds `idle_timeout_millis`.
    ///
    /// Age is measured from `joined_at`, not from the last activity.
    pub fn reap_idle(&mut self, now: Timestamp, idle_timeout_millis: i64) -> Vec<Participant> {
        // strictly older than the timeout: joined_at < now - timeout
        let cutoff = Timestamp::new(now.value().saturating_sub(idle_timeout_millis));

        self.registry
            .joined_before(cutoff)
            .iter()
            .filter_map(|id| self.registry.remove(id).ok())
            .collect()
    }
}
