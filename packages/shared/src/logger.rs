//! Logging setup shared by the lobby binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the binary itself plus the lobby library crates, so that
/// usecase and infrastructure logs show up next to the binary's own output.
/// `RUST_LOG` overrides the default when set.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "lobby_server", "lobby_client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use lobby_shared::logger::setup_logger;
///
/// setup_logger("lobby_server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "lobby_server={level},lobby_client={level},lobby_shared={level},{binary}={level},tower_http=info",
        level = default_log_level,
        binary = binary_target,
    )
}
