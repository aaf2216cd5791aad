//! Infrastructure layer: wire formats, delivery and storage.

pub mod dto;
pub mod message_pusher;
pub mod repository;
