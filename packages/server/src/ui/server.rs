//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::LobbyConfig, usecase::LobbyController};

use super::{
    handler::{
        announce_contract_updated, broadcast_message, clear_chat, health_check, lobby_stats,
        websocket_handler,
    },
    reaper::spawn_presence_reaper,
    signal::shutdown_signal,
    state::AppState,
};

/// Lobby server
///
/// # Example
///
/// ```ignore
/// let controller = Arc::new(LobbyController::new(repository, pusher, clock, idle_timeout));
/// let server = Server::new(controller, LobbyConfig::default());
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// LobbyController（全 UseCase の入口）
    controller: Arc<LobbyController>,
    config: LobbyConfig,
}

impl Server {
    pub fn new(controller: Arc<LobbyController>, config: LobbyConfig) -> Self {
        Self { controller, config }
    }

    /// Build the router without binding anything.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            controller: self.controller.clone(),
            admin_key: self.config.admin_key.clone(),
            queue_capacity: self.config.queue_capacity(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/lobby-stats", get(lobby_stats))
            // 管理 API
            .route("/api/clear-chat", post(clear_chat))
            .route("/api/broadcast-message", post(broadcast_message))
            .route("/api/contract-updated", post(announce_contract_updated))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the lobby server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// The presence reaper runs for exactly as long as the server does.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        tracing::info!("Lobby server listening on {}", listener.local_addr()?);
        let reaper = spawn_presence_reaper(self.controller.clone(), self.config.reap_interval);
        tracing::info!(
            "Presence reaper started (every {}s, idle timeout {}s)",
            self.config.reap_interval.as_secs(),
            self.config.idle_timeout.as_secs()
        );

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        reaper.abort();
        tracing::info!("Server shutdown complete");

        result
    }
}
