//! Session membership: create, join and leave.

use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::event_log::LogEvent;
use crate::message::ServerMessage;
use crate::server::GameServer;
use crate::types::{ConnectionId, GuestId, SessionId};

impl GameServer {
    /// Register a new session and join the requesting connection to it
    ///
    /// Id exhaustion is reported to the requester, who stays connected.
    pub(crate) fn create_session(&mut self, connection_id: ConnectionId) {
        let Some(client) = self.connections.get(connection_id) else {
            return;
        };

        if client.in_session() {
            self.send_error(connection_id, AppError::AlreadyInSession);
            return;
        }

        let (session_id, answer) = match self.registry.create() {
            Ok(session) => (session.id.clone(), session.answer.clone()),
            Err(e) => {
                warn!("Session create for {} failed: {}", connection_id, e);
                self.send_error(connection_id, e);
                return;
            }
        };

        info!("Connection {} created session {}", connection_id, session_id);
        debug!("Session {} answer: {}", session_id, answer);
        self.log_event(LogEvent::Created {
            session_id: session_id.to_string(),
            answer,
        });

        self.join(connection_id, session_id.as_str());
    }

    /// Add a connection's guest to a session
    ///
    /// An unknown session id is terminal for the requesting connection only.
    /// On success the other guests are told, the joiner gets the id and then
    /// a replay of the round so far.
    pub(crate) fn join(&mut self, connection_id: ConnectionId, session_id: &str) {
        let Some(client) = self.connections.get(connection_id) else {
            return;
        };

        if client.in_session() {
            self.send_error(connection_id, AppError::AlreadyInSession);
            return;
        }

        let guest = client.guest.clone();
        let session_id = SessionId::from_string(session_id);

        let session = match self.registry.require_mut(&session_id) {
            Ok(session) => session,
            Err(e) => {
                info!("Connection {} asked for unknown session {}", connection_id, session_id);
                self.send_error(connection_id, e);
                self.close_connection(connection_id);
                return;
            }
        };

        session.add_guest(guest.clone());
        let others: Vec<GuestId> = session.others(&guest).cloned().collect();

        if let Some(client) = self.connections.get_mut(connection_id) {
            client.session = Some(session_id.clone());
        }

        info!("{} joined session {}", guest, session_id);

        self.connections.broadcast(
            &others,
            &ServerMessage::Info {
                session_id: Some(session_id.to_string()),
                content: format!("{} joined!", guest),
            },
        );

        self.connections.send_to(
            connection_id,
            ServerMessage::SessionId {
                session_id: session_id.to_string(),
                content: session_id.to_string(),
            },
        );

        self.replay(connection_id, &session_id);
    }

    /// Take a connection's guest out of its session and close the connection
    ///
    /// No-op when the connection is not in a session. The session is deleted
    /// once its last guest leaves.
    pub(crate) fn leave(&mut self, connection_id: ConnectionId) {
        let Some(client) = self.connections.get_mut(connection_id) else {
            return;
        };
        let Some(session_id) = client.session.take() else {
            return;
        };
        let guest = client.guest.clone();

        if let Some(session) = self.registry.get_mut(&session_id) {
            session.remove_guest(&guest);
            let remaining = session.guests.clone();

            info!("{} left session {}", guest, session_id);
            self.log_event(LogEvent::Removed {
                removing: guest.to_string(),
                from: session_id.to_string(),
                clients: self.connections.len(),
            });

            self.connections.broadcast(
                &remaining,
                &ServerMessage::Info {
                    session_id: Some(session_id.to_string()),
                    content: format!("{} has left the game", guest),
                },
            );

            self.registry.destroy_if_empty(&session_id);
        }

        self.close_connection(connection_id);
    }
}
