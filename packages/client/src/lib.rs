//! Command-line client for the chat lobby.
//!
//! Joins the lobby under a remembered name, mirrors the players list, prints
//! chat and presence notices, and reconnects with exponential backoff.

pub mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ReconnectPolicy, run_client};
