//! Message protocol definitions
//!
//! JSON-based bidirectional message protocol using Serde's tagged enum
//! for type-safe serialization/deserialization.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::row::Row;

/// Client → Server message
///
/// All messages from client to server. Uses tagged enum with snake_case naming.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Create a new session and join it
    Create,
    /// Join an existing session by id
    Join { session_id: String },
    /// Submit a guess
    Guess { session_id: String, guess: String },
    /// Answer the "play again?" prompt
    Again {
        session_id: String,
        #[serde(default)]
        content: Option<String>,
    },
}

/// Payload of a guess broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessPayload {
    pub guess: Row,
    /// Guesses left in the round after this one
    pub rem: usize,
}

/// Server → Client message
///
/// All messages from server to client. Uses tagged enum with snake_case naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Display identity assigned on connect
    UserId { content: String },
    /// Session created or joined
    SessionId { session_id: String, content: String },
    /// An evaluated guess (live or replayed)
    Guess {
        session_id: String,
        content: GuessPayload,
    },
    /// Notice for the player
    Info {
        #[serde(skip_serializing_if = "Option::is_none")]
        session_id: Option<String>,
        content: String,
    },
    /// Round finished; asks whether to play again
    Again {
        session_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
        content: String,
    },
    /// Error occurred
    Error { code: ErrorCode, message: String },
}

/// Error codes for ServerMessage::Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Non-existent session id
    SessionNotFound,
    /// Could not allocate a session id
    NoSessionAvailable,
    /// Guess rejected by validation
    InvalidGuess,
    /// Invalid message format
    InvalidMessage,
    /// Already a guest of a session
    AlreadyInSession,
    /// Not a guest of the named session
    NotInSession,
    /// Round already won
    RoundOver,
}

/// Convert AppError to ServerMessage for client notification
impl From<AppError> for ServerMessage {
    fn from(err: AppError) -> Self {
        let (code, message) = match &err {
            AppError::SessionNotFound(session_id) => (
                ErrorCode::SessionNotFound,
                format!("no such session id {}", session_id),
            ),
            AppError::NoSessionAvailable => (
                ErrorCode::NoSessionAvailable,
                "no session available, try again".to_string(),
            ),
            AppError::InvalidGuess(reason) => (ErrorCode::InvalidGuess, reason.clone()),
            AppError::InvalidMessage(reason) => (
                ErrorCode::InvalidMessage,
                format!("Invalid message format: {}", reason),
            ),
            AppError::AlreadyInSession => (
                ErrorCode::AlreadyInSession,
                "You are already in a session".to_string(),
            ),
            AppError::NotInSession(session_id) => (
                ErrorCode::NotInSession,
                format!("You are not in session {}", session_id),
            ),
            AppError::RoundOver => (
                ErrorCode::RoundOver,
                "The round is over, waiting for a new one".to_string(),
            ),
            AppError::Json(e) => (
                ErrorCode::InvalidMessage,
                format!("Invalid message format: {}", e),
            ),
            // Fatal errors are not typically converted (connection closes)
            _ => (ErrorCode::InvalidMessage, "Internal error".to_string()),
        };
        ServerMessage::Error { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::word_to_row;

    #[test]
    fn test_client_message_deserialize() {
        let json = r#"{"type": "join", "session_id": "apple-crane"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Join { session_id } => assert_eq!(session_id, "apple-crane"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_again_without_content() {
        let json = r#"{"type": "again", "session_id": "apple-crane"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Again { content: None, .. }));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type": "chat", "content": "hi"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_guess_serialize() {
        let msg = ServerMessage::Guess {
            session_id: "apple-crane".to_string(),
            content: GuessPayload {
                guess: word_to_row("ab"),
                rem: 19,
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"guess\""));
        assert!(json.contains("\"rem\":19"));
        assert!(json.contains("\"letter\":\"a\""));
    }

    #[test]
    fn test_info_omits_missing_session() {
        let msg = ServerMessage::Info {
            session_id: None,
            content: "goodbye".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"info","content":"goodbye"}"#);
    }

    #[test]
    fn test_error_code_serialize() {
        let msg: ServerMessage = AppError::SessionNotFound("apple-crane".to_string()).into();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"code\":\"session_not_found\""));
        assert!(json.contains("apple-crane"));
    }

    #[test]
    fn test_not_in_session_code() {
        let msg: ServerMessage = AppError::NotInSession("apple-crane".to_string()).into();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"code\":\"not_in_session\""));
        assert!(json.contains("apple-crane"));
    }
}
