//! Word-Guessing Game Server - Entry Point
//!
//! Loads configuration, starts the GameServer actor and accepts connections.

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wordle_server::{handle_connection, Config, GameServer};

/// Channel buffer size for server commands
const CHANNEL_BUFFER_SIZE: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=wordle_server=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wordle_server=info")),
        )
        .init();

    // Bind address from the first argument, the rest from WORDLE_* variables
    let config = Config::from_env();

    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let server = GameServer::from_config(cmd_rx, &config)?;

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Word game server listening on {}", config.addr);
    info!(
        "Max guesses per round: {}, event log: {}",
        config.max_guesses,
        config
            .event_log_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "off".to_string())
    );

    tokio::spawn(server.run());

    info!("GameServer actor started");

    // Connection accept loop
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, cmd_tx).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
