//! HTTP and WebSocket handlers.

mod admin;
mod http;
mod websocket;

pub use admin::{announce_contract_updated, broadcast_message, clear_chat};
pub use http::{health_check, lobby_stats};
pub use websocket::websocket_handler;
