//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use lobby_server::domain::DEFAULT_DISPLAY_NAME;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    domain::{backoff_delay, should_attempt_reconnect},
    error::ClientError,
    session::{ClientState, run_client_session},
    ui::prompt,
};

/// How persistently the client reconnects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    /// Delay before the first retry; doubled on each further attempt
    pub base_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_millis(2000),
        }
    }
}

/// Read stdin on a dedicated thread for the whole run, so reconnects never
/// leave a second reader behind.
fn spawn_input_reader(state: Arc<ClientState>) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt(&state.name())) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run the lobby client with reconnection logic
///
/// Every (re)connect joins under the most recent name, including one set
/// with `/name`. The attempt counter restarts after a connection that was
/// actually established.
pub async fn run_client(
    url: String,
    name: String,
    policy: ReconnectPolicy,
) -> Result<(), ClientError> {
    // The server applies the same default to a blank name
    let name = match name.trim() {
        "" => DEFAULT_DISPLAY_NAME.to_string(),
        trimmed => trimmed.to_string(),
    };
    let state = Arc::new(ClientState::new(name));
    let mut input_rx = spawn_input_reader(state.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, state.name());

        let error = match run_client_session(&url, &state, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                return Ok(());
            }
            Err(e) => e,
        };

        if error == ClientError::ConnectionLost {
            reconnect_count = 0;
        }

        if !should_attempt_reconnect(&error, reconnect_count, policy.max_attempts) {
            tracing::error!(
                "Giving up after {} reconnect attempts: {}",
                reconnect_count,
                error
            );
            return Err(error);
        }

        let delay = backoff_delay(policy.base_delay, reconnect_count);
        tracing::warn!("{}", error);
        tracing::info!(
            "Reconnecting in {} ms... (attempt {}/{})",
            delay.as_millis(),
            reconnect_count + 1,
            policy.max_attempts
        );
        reconnect_count += 1;

        tokio::time::sleep(delay).await;
    }
}
