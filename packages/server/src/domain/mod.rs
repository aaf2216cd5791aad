//! Domain layer: lobby state, its invariants and the interfaces it needs.

pub mod entity;
pub mod error;
pub mod event;
pub mod history;
pub mod lobby;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatEvent, Participant};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use event::{ClientEvent, LobbyEvent};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use lobby::Lobby;
pub use message_pusher::{DEFAULT_OUTBOUND_QUEUE_CAPACITY, MessagePusher, PusherChannel};
pub use registry::SessionRegistry;
pub use value_object::{
    ConnectionId, DEFAULT_DISPLAY_NAME, DisplayName, MAX_MESSAGE_CHARS, MessageText,
    SYSTEM_DISPLAY_NAME, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
