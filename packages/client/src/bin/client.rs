//! Command-line lobby client with reconnection support.
//!
//! Joins the lobby under the given name, prints the players list and chat,
//! and sends every typed line as a chat message. `/name <new name>` renames.
//! Reconnects with exponential backoff when the connection drops.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lobby-client -- --name Alice
//! cargo run --bin lobby-client -- -n Bob -u ws://127.0.0.1:3000/ws
//! ```

use std::time::Duration;

use clap::Parser;

use lobby_client::{ReconnectPolicy, run_client};
use lobby_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "lobby-client")]
#[command(about = "Chat lobby client with presence and reconnect support", long_about = None)]
struct Args {
    /// Display name to join with (blank joins as "Anonymous")
    #[arg(short = 'n', long, default_value = "")]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Reconnect attempts before giving up
    #[arg(long, default_value_t = 10)]
    max_reconnect_attempts: u32,

    /// Delay before the first reconnect; doubled per attempt, capped at 5 s
    #[arg(long, default_value_t = 2000)]
    reconnect_delay_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let policy = ReconnectPolicy {
        max_attempts: args.max_reconnect_attempts,
        base_delay: Duration::from_millis(args.reconnect_delay_ms),
    };

    // Run the client
    if let Err(e) = run_client(args.url, args.name, policy).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
