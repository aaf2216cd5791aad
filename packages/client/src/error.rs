//! Error types for the lobby client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server URL cannot be used at all; retrying will not help
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed or failed
    #[error("Connection lost")]
    ConnectionLost,
}
