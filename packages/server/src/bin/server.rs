//! Lobby presence and broadcast server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lobby-server
//! cargo run --bin lobby-server -- --host 0.0.0.0 --port 3000 --admin-key secret
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use lobby_server::{
    config::{
        DEFAULT_ADMIN_KEY, LobbyConfig, MAX_HISTORY_CAPACITY, MAX_OUTBOUND_QUEUE_CAPACITY,
        MAX_REAP_INTERVAL,
    },
    domain::{DEFAULT_HISTORY_CAPACITY, DEFAULT_OUTBOUND_QUEUE_CAPACITY, MessagePusher},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryLobbyRepository},
    ui::Server,
    usecase::LobbyController,
};
use lobby_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "lobby-server")]
#[command(about = "Real-time lobby presence and broadcast server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "LOBBY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "LOBBY_PORT", default_value = "3000")]
    port: u16,

    /// Shared secret for the admin API
    #[arg(long, env = "LOBBY_ADMIN_KEY", default_value = DEFAULT_ADMIN_KEY)]
    admin_key: String,

    /// Number of chat messages replayed to new participants
    #[arg(
        long,
        env = "LOBBY_HISTORY_CAPACITY",
        default_value_t = DEFAULT_HISTORY_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(0..=MAX_HISTORY_CAPACITY as u64)
    )]
    history_capacity: usize,

    /// Seconds between presence reaper sweeps
    #[arg(
        long,
        env = "LOBBY_REAP_INTERVAL_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..=MAX_REAP_INTERVAL.as_secs())
    )]
    reap_interval_secs: u64,

    /// Seconds after joining before a participant is reaped
    #[arg(long, env = "LOBBY_IDLE_TIMEOUT_SECS", default_value_t = 1800)]
    idle_timeout_secs: u64,

    /// Frames a slow client may have pending before it stops receiving broadcasts
    #[arg(
        long,
        env = "LOBBY_OUTBOUND_QUEUE_CAPACITY",
        default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_OUTBOUND_QUEUE_CAPACITY as u64)
    )]
    outbound_queue_capacity: usize,
}

impl From<Args> for LobbyConfig {
    fn from(args: Args) -> Self {
        Self {
            admin_key: args.admin_key,
            history_capacity: args.history_capacity,
            reap_interval: Duration::from_secs(args.reap_interval_secs),
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
            outbound_queue_capacity: args.outbound_queue_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let (host, port) = (args.host.clone(), args.port);
    let config = LobbyConfig::from(args);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. LobbyController (UseCases)
    // 4. Server

    // 1. Create Repository (in-memory lobby)
    let repository = InMemoryLobbyRepository::with_history_capacity(config.history_capacity);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Create LobbyController
    let controller = Arc::new(LobbyController::new(
        repository,
        message_pusher,
        Arc::new(SystemClock),
        config.idle_timeout,
    ));

    // 4. Create and run the server
    let server = Server::new(controller, config);
    if let Err(e) = server.run(host, port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
