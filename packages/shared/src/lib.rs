//! Utilities shared by the lobby server and client.

pub mod logger;
pub mod time;
