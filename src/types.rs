//! Basic type definitions for the game server
//!
//! Provides newtype wrappers for type safety:
//! - `ConnectionId`: UUID-based transport identity of a socket
//! - `GuestId`: display identity a connection plays under
//! - `SessionId`: `<word>-<word>` session name, case-insensitive

use uuid::Uuid;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4. Owned by the transport; the game core only ever
/// sees it as a key into the live-connection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short hex tag used when no display name is left to hand out
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Guest display identity
///
/// Opaque to the game core. Unique among live connections because it is
/// reserved from the `Names` pool (or derived from the connection id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestId(pub String);

impl GuestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session identifier, two dictionary words joined by `-`
///
/// Always stored lower-case so ids typed by players match regardless of case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Separator between the two words of an id
    pub const SEPARATOR: char = '-';

    /// Build an id from its two words
    pub fn from_words(first: &str, second: &str) -> Self {
        Self(format!("{}{}{}", first, Self::SEPARATOR, second).to_lowercase())
    }

    /// Create a SessionId from client input (converts to lowercase)
    pub fn from_string(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
