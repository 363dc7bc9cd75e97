//! Live-connection table and session fan-out.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::client::Client;
use crate::message::ServerMessage;
use crate::types::{ConnectionId, GuestId};

/// All live connections, addressable by connection id or guest id
#[derive(Debug, Default)]
pub struct ConnectionTable {
    clients: HashMap<ConnectionId, Client>,
    guests: HashMap<GuestId, ConnectionId>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, client: Client) {
        self.guests.insert(client.guest.clone(), client.id);
        self.clients.insert(client.id, client);
    }

    /// Drop a connection from the table, closing its outbound channel
    pub fn remove(&mut self, id: ConnectionId) -> Option<Client> {
        let client = self.clients.remove(&id)?;
        self.guests.remove(&client.guest);
        Some(client)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// Resolve a guest id to its live connection
    pub fn by_guest(&self, guest: &GuestId) -> Option<&Client> {
        self.guests.get(guest).and_then(|id| self.clients.get(id))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Send to one connection; a vanished, full or closed connection is logged and skipped
    pub fn send_to(&self, id: ConnectionId, msg: ServerMessage) -> bool {
        let Some(client) = self.clients.get(&id) else {
            debug!("Connection {} gone, dropping message", id);
            return false;
        };
        match client.send(msg) {
            Ok(()) => true,
            Err(e) => {
                warn!(connection = %id, guest = %client.guest, "send failed: {}", e);
                false
            }
        }
    }

    /// Send `msg` to each guest in order, best-effort per recipient
    ///
    /// Returns how many guests the message was handed to.
    pub fn broadcast<'a>(
        &self,
        guests: impl IntoIterator<Item = &'a GuestId>,
        msg: &ServerMessage,
    ) -> usize {
        let mut delivered = 0;
        for guest in guests {
            let Some(client) = self.by_guest(guest) else {
                debug!("Guest {} has no live connection, skipping", guest);
                continue;
            };
            match client.send(msg.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(guest = %guest, "broadcast send failed: {}", e),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn info(text: &str) -> ServerMessage {
        ServerMessage::Info {
            session_id: None,
            content: text.to_string(),
        }
    }

    fn client(name: &str) -> (Client, mpsc::Receiver<ServerMessage>) {
        let (tx, rx) = mpsc::channel(8);
        (
            Client::new(ConnectionId::new(), GuestId(name.to_string()), tx),
            rx,
        )
    }

    #[test]
    fn test_insert_and_remove() {
        let mut table = ConnectionTable::new();
        let (ada, _rx) = client("ada");
        let id = ada.id;
        table.insert(ada);

        assert_eq!(table.len(), 1);
        assert!(table.by_guest(&GuestId("ada".to_string())).is_some());

        assert!(table.remove(id).is_some());
        assert!(table.by_guest(&GuestId("ada".to_string())).is_none());
        assert!(table.remove(id).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_broadcast_skips_failures() {
        let mut table = ConnectionTable::new();
        let (ada, mut ada_rx) = client("ada");
        let (leo, leo_rx) = client("leo");
        let (mara, mut mara_rx) = client("mara");
        table.insert(ada);
        table.insert(leo);
        table.insert(mara);
        drop(leo_rx);

        let guests: Vec<GuestId> = ["ada", "leo", "ghost", "mara"]
            .iter()
            .map(|n| GuestId(n.to_string()))
            .collect();
        let delivered = table.broadcast(&guests, &info("hello"));

        assert_eq!(delivered, 2);
        assert_eq!(ada_rx.try_recv().unwrap(), info("hello"));
        assert_eq!(mara_rx.try_recv().unwrap(), info("hello"));
    }

    #[test]
    fn test_broadcast_skips_full_channel() {
        let mut table = ConnectionTable::new();
        let (ada, mut ada_rx) = client("ada");
        let (tx, _leo_rx) = mpsc::channel(1);
        let leo = Client::new(ConnectionId::new(), GuestId("leo".to_string()), tx);
        let leo_id = leo.id;
        table.insert(ada);
        table.insert(leo);

        let guests: Vec<GuestId> = ["leo", "ada"]
            .iter()
            .map(|n| GuestId(n.to_string()))
            .collect();
        assert_eq!(table.broadcast(&guests, &info("one")), 2);
        assert_eq!(table.broadcast(&guests, &info("two")), 1);

        assert_eq!(ada_rx.try_recv().unwrap(), info("one"));
        assert_eq!(ada_rx.try_recv().unwrap(), info("two"));
        assert_eq!(table.get(leo_id).unwrap().drop_count(), 1);
        assert!(!table.send_to(leo_id, info("three")));
    }

    #[test]
    fn test_send_to_missing_connection() {
        let table = ConnectionTable::new();
        assert!(!table.send_to(ConnectionId::new(), info("hi")));
    }
}
