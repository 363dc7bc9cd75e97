//! GameServer Actor implementation
//!
//! The central actor that owns all state: live connections, sessions and the
//! name pool. Every command is handled to completion, broadcasts included,
//! before the next one is received, so session state needs no locking.
//!
//! Membership operations live in `membership.rs`, guess and replay handling
//! in `round.rs`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::broadcast::ConnectionTable;
use crate::client::Client;
use crate::config::{Config, DEFAULT_MAX_GUESSES};
use crate::error::AppError;
use crate::event_log::{EventLog, LogEvent};
use crate::message::ServerMessage;
use crate::registry::SessionRegistry;
use crate::types::{ConnectionId, GuestId};
use crate::wordlist::Names;

/// Commands sent from handlers to the GameServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New connection opened
    Connect {
        connection_id: ConnectionId,
        sender: mpsc::Sender<ServerMessage>,
    },
    /// Connection closed or errored
    Disconnect { connection_id: ConnectionId },
    /// Create a new session
    Create { connection_id: ConnectionId },
    /// Join an existing session
    Join {
        connection_id: ConnectionId,
        session_id: String,
    },
    /// Submit a guess
    Guess {
        connection_id: ConnectionId,
        session_id: String,
        guess: String,
    },
    /// Answer to the "play again?" prompt
    Again {
        connection_id: ConnectionId,
        session_id: String,
        content: Option<String>,
    },
    /// Frame that could not be decoded
    Invalid {
        connection_id: ConnectionId,
        reason: String,
    },
}

/// The main GameServer actor
pub struct GameServer {
    /// Live connections
    pub(crate) connections: ConnectionTable,
    /// Live sessions
    pub(crate) registry: SessionRegistry,
    /// Display identities
    pub(crate) names: Names,
    names_rng: StdRng,
    pub(crate) max_guesses: usize,
    pub(crate) event_log: Option<EventLog>,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl GameServer {
    /// Create a new GameServer with the given command receiver
    pub fn new(
        receiver: mpsc::Receiver<ServerCommand>,
        registry: SessionRegistry,
        names: Names,
    ) -> Self {
        Self {
            connections: ConnectionTable::new(),
            registry,
            names,
            names_rng: StdRng::from_entropy(),
            max_guesses: DEFAULT_MAX_GUESSES,
            event_log: None,
            receiver,
        }
    }

    /// Build a server from configuration, loading word and name lists
    pub fn from_config(
        receiver: mpsc::Receiver<ServerCommand>,
        config: &Config,
    ) -> Result<Self, AppError> {
        let words = config.load_words()?;
        let names = config.load_names()?;
        let registry = match config.seed {
            Some(seed) => SessionRegistry::with_seed(words, seed),
            None => SessionRegistry::new(words),
        };
        let mut server = Self::new(receiver, registry, names).with_max_guesses(config.max_guesses);
        if let Some(seed) = config.seed {
            server.names_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        }
        if let Some(log) = config.open_event_log()? {
            server = server.with_event_log(log);
        }
        Ok(server)
    }

    pub fn with_max_guesses(mut self, max_guesses: usize) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.event_log = Some(log);
        self
    }

    /// Run the GameServer event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self) {
        info!("GameServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("GameServer shutting down");
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect {
                connection_id,
                sender,
            } => {
                self.handle_connect(connection_id, sender);
            }
            ServerCommand::Disconnect { connection_id } => {
                self.handle_disconnect(connection_id);
            }
            ServerCommand::Create { connection_id } => {
                self.create_session(connection_id);
            }
            ServerCommand::Join {
                connection_id,
                session_id,
            } => {
                self.join(connection_id, &session_id);
            }
            ServerCommand::Guess {
                connection_id,
                session_id,
                guess,
            } => {
                self.submit_guess(connection_id, &session_id, &guess);
            }
            ServerCommand::Again {
                connection_id,
                session_id,
                content,
            } => {
                self.respond_again(connection_id, &session_id, content.as_deref());
            }
            ServerCommand::Invalid {
                connection_id,
                reason,
            } => {
                debug!("Invalid message from {}: {}", connection_id, reason);
                self.send_error(connection_id, AppError::InvalidMessage(reason));
            }
        }
    }

    /// Handle new connection: reserve a display name and announce it
    fn handle_connect(
        &mut self,
        connection_id: ConnectionId,
        sender: mpsc::Sender<ServerMessage>,
    ) {
        let guest = match self.names.reserve(&mut self.names_rng) {
            Some(name) => GuestId(name),
            None => GuestId(format!("guest-{}", connection_id.short())),
        };
        info!("Connection {} playing as {}", connection_id, guest);

        self.connections.insert(Client::new(connection_id, guest.clone(), sender));
        self.connections.send_to(
            connection_id,
            ServerMessage::UserId {
                content: guest.to_string(),
            },
        );

        debug!(
            "Total connections: {}, Total sessions: {}, Names left: {}",
            self.connections.len(),
            self.registry.len(),
            self.names.available()
        );
    }

    /// Handle transport close: leave any session and drop the connection
    fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        if self.connections.get(connection_id).is_none() {
            return;
        }
        info!("Connection {} disconnected", connection_id);
        self.leave(connection_id);
        self.close_connection(connection_id);

        debug!(
            "Total connections: {}, Total sessions: {}",
            self.connections.len(),
            self.registry.len()
        );
    }

    /// Drop a connection and free its display name
    ///
    /// Dropping the client's sender lets the writer task flush what is
    /// queued and close the socket. No-op if already closed.
    pub(crate) fn close_connection(&mut self, connection_id: ConnectionId) {
        if let Some(client) = self.connections.remove(connection_id) {
            self.names.release(client.guest.as_str());
            debug!("Connection {} closed", connection_id);
        }
    }

    /// Report an error to one connection
    pub(crate) fn send_error(&self, connection_id: ConnectionId, err: AppError) {
        self.connections.send_to(connection_id, err.into());
    }

    pub(crate) fn log_event(&mut self, event: LogEvent) {
        if let Some(log) = self.event_log.as_mut() {
            log.record(&event);
        }
    }
}
