//! Client struct definition
//!
//! Represents a live connection with its guest identity and communication
//! channel. Dropping a `Client` drops its sender, which ends the writer
//! task and closes the socket.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::message::ServerMessage;
use crate::types::{ConnectionId, GuestId, SessionId};

/// Connected client information
#[derive(Debug)]
pub struct Client {
    /// Transport identity of this connection
    pub id: ConnectionId,
    /// Display identity the connection plays under
    pub guest: GuestId,
    /// Session joined (None before create/join)
    pub session: Option<SessionId>,
    /// Server → Client message channel
    pub sender: mpsc::Sender<ServerMessage>,
    /// Messages dropped because the channel was full or closed
    dropped_messages: AtomicU64,
}

impl Client {
    /// Create a new client with the given ids and sender channel
    pub fn new(id: ConnectionId, guest: GuestId, sender: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id,
            guest,
            session: None,
            sender,
            dropped_messages: AtomicU64::new(0),
        }
    }

    /// Queue a message for this client without waiting
    ///
    /// A client that stops reading fills its channel; further messages are
    /// dropped and counted rather than stalling the server.
    pub fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.sender.try_send(msg).map_err(|e| {
            let _ = self.dropped_messages.fetch_add(1, Ordering::Relaxed);
            match e {
                TrySendError::Full(_) => SendError::Full,
                TrySendError::Closed(_) => SendError::ChannelClosed,
            }
        })
    }

    /// Total messages dropped for this client
    pub fn drop_count(&self) -> u64 {
        self.dropped_messages.load(Ordering::Relaxed)
    }

    /// Check if this client has joined a session
    pub fn in_session(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(name: &str) -> ServerMessage {
        ServerMessage::UserId {
            content: name.to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let client = Client::new(ConnectionId::new(), GuestId("ada".to_string()), tx);

        assert!(!client.in_session());
        assert_eq!(client.drop_count(), 0);
        assert_eq!(client.guest.as_str(), "ada");
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel(32);
        let client = Client::new(ConnectionId::new(), GuestId("ada".to_string()), tx);
        drop(rx);

        let result = client.send(user_id("ada"));
        assert!(matches!(result, Err(SendError::ChannelClosed)));
        assert_eq!(client.drop_count(), 1);
    }

    #[test]
    fn test_full_channel_does_not_block() {
        let (tx, mut rx) = mpsc::channel(2);
        let client = Client::new(ConnectionId::new(), GuestId("ada".to_string()), tx);

        assert!(client.send(user_id("1")).is_ok());
        assert!(client.send(user_id("2")).is_ok());
        assert!(matches!(client.send(user_id("3")), Err(SendError::Full)));
        assert_eq!(client.drop_count(), 1);

        // Draining frees room again
        assert_eq!(rx.try_recv().unwrap(), user_id("1"));
        assert!(client.send(user_id("4")).is_ok());
    }
}
