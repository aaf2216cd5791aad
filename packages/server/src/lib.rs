//! Real-time lobby server library.
//!
//! Tracks who is present in a single shared lobby, keeps a bounded chat
//! history, and fans every presence or chat change out to all connected
//! WebSocket clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
