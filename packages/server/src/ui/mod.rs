//! WebSocket and admin HTTP surface of the lobby server.

mod handler;
mod reaper;
mod server;
mod signal;
pub mod state;

pub use reaper::spawn_presence_reaper;
pub use server::Server;
