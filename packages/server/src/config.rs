//! Runtime settings of the lobby server.
//!
//! The binary fills this from its command line; tests build it directly.

use std::time::Duration;

use crate::domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_OUTBOUND_QUEUE_CAPACITY};

/// Shared secret accepted by the admin API when none is configured
pub const DEFAULT_ADMIN_KEY: &str = "your";
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub const MAX_HISTORY_CAPACITY: usize = 10_000;
pub const MAX_OUTBOUND_QUEUE_CAPACITY: usize = 65_536;
/// Longest reaper period the timer accepts
pub const MAX_REAP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Frames queued for a joiner besides the history replay
/// (own snapshot, broadcast snapshot, `userJoined`)
const JOIN_EXTRA_FRAMES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Key compared by equality on every admin request
    pub admin_key: String,
    /// Number of chat events kept for replay
    pub history_capacity: usize,
    /// Period of the presence reaper
    pub reap_interval: Duration,
    /// Age (from join time) after which a participant is reaped
    pub idle_timeout: Duration,
    /// Frames a connection may have pending before it is dropped from delivery
    pub outbound_queue_capacity: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            reap_interval: DEFAULT_REAP_INTERVAL,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
        }
    }
}

impl LobbyConfig {
    /// Length of each connection's outbound queue.
    ///
    /// Never shorter than one join (snapshot plus full history replay), and
    /// within what `tokio::sync::mpsc::channel` accepts.
    pub fn queue_capacity(&self) -> usize {
        self.outbound_queue_capacity
            .max(self.history_capacity.saturating_add(JOIN_EXTRA_FRAMES))
            .clamp(1, MAX_OUTBOUND_QUEUE_CAPACITY)
    }
}
