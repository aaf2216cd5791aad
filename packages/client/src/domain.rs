//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::time::Duration;

use crate::error::ClientError;

/// Upper bound of the reconnect delay
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// One line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Plain text: send as a chat message
    Chat(String),
    /// `/name <new>`: rename and remember the new name
    Rename(String),
    /// `/players`: print the mirrored players list
    ShowPlayers,
    /// `/quit`: leave the lobby and exit
    Quit,
    /// A slash command that is not understood (or is missing its argument)
    Unknown(String),
}

/// Interpret one input line.
///
/// Returns `None` for a blank line.
pub fn parse_input(line: &str) -> Option<UserInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(UserInput::Chat(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    let input = match (name, argument) {
        ("name", new_name) if !new_name.is_empty() => UserInput::Rename(new_name.to_string()),
        ("players", _) => UserInput::ShowPlayers,
        ("quit", _) => UserInput::Quit,
        _ => UserInput::Unknown(line.to_string()),
    };
    Some(input)
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Delay before reconnect attempt `attempt` (0-indexed): `base * 2^attempt`,
/// capped at `MAX_RECONNECT_DELAY`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.checked_mul(factor)
        .unwrap_or(MAX_RECONNECT_DELAY)
        .min(MAX_RECONNECT_DELAY)
}
