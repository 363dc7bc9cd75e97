//! Multi-guest WebSocket Word-Guessing Server Library
//!
//! A WebSocket game server built with tokio-tungstenite where any number of
//! guests share a session: one hidden five-letter answer, one ordered guess
//! history, and a shared "play again" vote.
//!
//! # Features
//! - Display identities reserved from a name pool
//! - Sessions named by two dictionary words (`maple-otter`)
//! - Two-pass guess scoring with correct duplicate-letter handling
//! - Replay of the round so far for late joiners
//! - Win/loss detection and a single-reset "play again" race
//! - Optional JSON Lines event log
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `GameServer` is the central actor owning connections and sessions
//! - Each connection has a `handler` task communicating with the server
//! - No locks needed - one command is fully handled before the next
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use wordle_server::{handle_connection, Config, GameServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let listener = TcpListener::bind(&config.addr).await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(GameServer::from_config(cmd_rx, &config).unwrap().run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod broadcast;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_log;
pub mod handler;
mod membership;
pub mod message;
pub mod registry;
mod round;
pub mod row;
pub mod server;
pub mod session;
pub mod types;
pub mod validation;
pub mod wordlist;

// Re-export main types for convenience
pub use broadcast::ConnectionTable;
pub use client::Client;
pub use config::Config;
pub use engine::{evaluate, Evaluation};
pub use error::{AppError, SendError};
pub use event_log::{EventLog, LogEvent};
pub use handler::handle_connection;
pub use message::{ClientMessage, ErrorCode, GuessPayload, ServerMessage};
pub use registry::SessionRegistry;
pub use row::{row_to_word, word_to_row, Letter, LetterState, Row};
pub use server::{GameServer, ServerCommand};
pub use session::{Outcome, RoundState, Session};
pub use types::{ConnectionId, GuestId, SessionId};
pub use wordlist::{Names, WordList};
