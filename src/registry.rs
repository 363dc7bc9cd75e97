//! Session registry
//!
//! Owns every live session, keyed by id. Ids and answers are drawn from the
//! shared word list with the registry's own RNG, so a seeded registry is
//! fully reproducible.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::AppError;
use crate::session::Session;
use crate::types::SessionId;
use crate::wordlist::WordList;

/// Attempts at drawing a free session id before giving up
pub const MAX_ID_ATTEMPTS: usize = 10;

/// Mapping from session id to session
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    words: WordList,
    rng: StdRng,
}

impl SessionRegistry {
    /// Create a registry with an entropy-seeded RNG
    pub fn new(words: WordList) -> Self {
        Self::with_rng(words, StdRng::from_entropy())
    }

    /// Create a registry with a deterministic RNG
    pub fn with_seed(words: WordList, seed: u64) -> Self {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: WordList, rng: StdRng) -> Self {
        Self {
            sessions: HashMap::new(),
            words,
            rng,
        }
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Draw an id not naming any live session
    ///
    /// Fails with `NoSessionAvailable` after `MAX_ID_ATTEMPTS` collisions.
    pub fn create_id(&mut self) -> Result<SessionId, AppError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let first = self.words.random_word(&mut self.rng).to_string();
            let second = self.words.random_word(&mut self.rng).to_string();
            let id = SessionId::from_words(&first, &second);
            if !self.sessions.contains_key(&id) {
                return Ok(id);
            }
            debug!("Session id {} taken (attempt {})", id, attempt);
        }
        Err(AppError::NoSessionAvailable)
    }

    /// Pick a fresh answer of the configured length
    pub fn new_answer(&mut self) -> String {
        self.words.random_answer(&mut self.rng).to_string()
    }

    /// Register a new empty session with a fresh id and answer
    pub fn create(&mut self) -> Result<&mut Session, AppError> {
        let id = self.create_id()?;
        let answer = self.new_answer();
        let session = Session::new(id.clone(), answer);
        Ok(self.sessions.entry(id).or_insert(session))
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Like `get_mut`, failing with `SessionNotFound`
    pub fn require_mut(&mut self, id: &SessionId) -> Result<&mut Session, AppError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    /// Remove the session iff it has no guests; returns whether it was removed
    pub fn destroy_if_empty(&mut self, id: &SessionId) -> bool {
        if self.sessions.get(id).is_some_and(Session::is_empty) {
            self.sessions.remove(id);
            debug!("Session {} deleted (empty)", id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuestId;

    fn registry(words: &str) -> SessionRegistry {
        SessionRegistry::with_seed(WordList::parse(words, 5).unwrap(), 42)
    }

    #[test]
    fn test_create_registers_session() {
        let mut registry = registry("crane\nslate\napple\nmaple\n");
        let id = registry.create().unwrap().id.clone();

        let session = registry.get(&id).unwrap();
        assert_eq!(session.answer.len(), 5);
        assert!(session.guesses.is_empty());
        assert_eq!(id.as_str().split('-').count(), 2);
    }

    #[test]
    fn test_ids_unique_among_live_sessions() {
        let mut registry = registry("crane\nslate\napple\nmaple\nlemon\nmelon\n");
        let mut ids = Vec::new();
        for _ in 0..10 {
            ids.push(registry.create().unwrap().id.clone());
        }
        let mut deduped = ids.clone();
        deduped.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_exhausted_id_space() {
        // A single word can only ever produce "crane-crane"
        let mut registry = registry("crane\n");
        registry.create().unwrap();

        let err = registry.create().unwrap_err();
        assert!(matches!(err, AppError::NoSessionAvailable));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_destroy_if_empty() {
        let mut registry = registry("crane\nslate\n");
        let id = registry.create().unwrap().id.clone();

        registry
            .get_mut(&id)
            .unwrap()
            .add_guest(GuestId("ada".to_string()));
        assert!(!registry.destroy_if_empty(&id));
        assert!(registry.contains(&id));

        registry
            .get_mut(&id)
            .unwrap()
            .remove_guest(&GuestId("ada".to_string()));
        assert!(registry.destroy_if_empty(&id));
        assert!(registry.get(&id).is_none());
    }

    #[test]
    fn test_require_mut_not_found() {
        let mut registry = registry("crane\n");
        let err = registry
            .require_mut(&SessionId::from_string("no-such"))
            .unwrap_err();
        assert!(matches!(err, AppError::SessionNotFound(id) if id == "no-such"));
    }
}
