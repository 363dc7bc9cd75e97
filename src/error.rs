//! Error types for the game server
//!
//! Defines application-level errors and message send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Covers both fatal errors (connection or startup failure) and game
/// errors (reported to the originating connection as an `error` message).
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error (fatal)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (fatal - internal channel broken)
    #[error("Channel send error")]
    ChannelSend,

    /// No live session with the given id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Every generated session id collided with a live session
    #[error("No session available")]
    NoSessionAvailable,

    /// Guess failed structural validation
    #[error("Invalid guess: {0}")]
    InvalidGuess(String),

    /// Message could not be decoded
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Connection is already a guest of a session
    #[error("Already in session")]
    AlreadyInSession,

    /// Connection is not a guest of the named session
    #[error("Not in session: {0}")]
    NotInSession(String),

    /// The round was won; no guesses until it is reset
    #[error("Round over")]
    RoundOver,

    /// Word list has no word of the answer length
    #[error("Word list has no words of length {0}")]
    EmptyWordList(usize),
}

/// Message send errors
///
/// Occurs when a client channel is closed or has no room left.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,

    /// The receiver is not keeping up; the message was dropped
    #[error("Channel full")]
    Full,
}
