//! Data Transfer Objects (DTOs) for the lobby.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (both directions)
//! - `http`: admin API request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
