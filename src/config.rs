//! Server configuration
//!
//! The bind address comes from the first command-line argument; everything
//! else from `WORDLE_*` environment variables.

use std::path::PathBuf;

use tracing::warn;

use crate::error::AppError;
use crate::event_log::EventLog;
use crate::wordlist::{Names, WordList};

/// Default server address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Default maximum guesses per round
pub const DEFAULT_MAX_GUESSES: usize = 20;

/// Letters in every answer
pub const ANSWER_LENGTH: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub max_guesses: usize,
    pub answer_length: usize,
    pub words_path: Option<PathBuf>,
    pub names_path: Option<PathBuf>,
    pub event_log_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            max_guesses: DEFAULT_MAX_GUESSES,
            answer_length: ANSWER_LENGTH,
            words_path: None,
            names_path: None,
            event_log_path: None,
            seed: None,
        }
    }
}

impl Config {
    /// Read configuration from the process arguments and environment
    pub fn from_env() -> Self {
        Self::from_lookup(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    /// Build a config from an optional address and a variable lookup
    pub fn from_lookup(addr: Option<String>, var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: addr.unwrap_or(defaults.addr),
            max_guesses: parse_var(&var, "WORDLE_MAX_GUESSES")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.max_guesses),
            answer_length: defaults.answer_length,
            words_path: var("WORDLE_WORDS").map(PathBuf::from),
            names_path: var("WORDLE_NAMES").map(PathBuf::from),
            event_log_path: var("WORDLE_EVENT_LOG").map(PathBuf::from),
            seed: parse_var(&var, "WORDLE_SEED"),
        }
    }

    /// Load the configured word list, or the embedded one
    pub fn load_words(&self) -> Result<WordList, AppError> {
        match &self.words_path {
            Some(path) => WordList::from_path(path, self.answer_length),
            None => WordList::embedded(self.answer_length),
        }
    }

    /// Load the configured name pool, or the embedded one
    pub fn load_names(&self) -> Result<Names, AppError> {
        match &self.names_path {
            Some(path) => Names::from_path(path),
            None => Ok(Names::embedded()),
        }
    }

    /// Open the event log if one is configured
    pub fn open_event_log(&self) -> Result<Option<EventLog>, AppError> {
        self.event_log_path
            .as_ref()
            .map(EventLog::create)
            .transpose()
    }
}

fn parse_var<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", key, raw);
            None
        }
    }
}
