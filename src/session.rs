//! Session struct definition
//!
//! One puzzle shared by a set of guests: the hidden answer, the guesses
//! made so far this round, and who is playing.

use crate::row::Row;
use crate::types::{GuestId, SessionId};

/// Reset gate of a session
///
/// `Resetting` is entered by the first affirmative "play again" vote and
/// only left when a round is won. While it is held, further affirmative
/// votes replay the current guesses instead of resetting again. A lost
/// round does not release it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Playing,
    Resetting,
}

/// How the current round ended, if it has
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won { winner: GuestId },
    Lost,
}

/// A game session
#[derive(Debug)]
pub struct Session {
    /// Session id for identification
    pub id: SessionId,
    /// Hidden answer, lower case
    pub answer: String,
    /// Evaluated guesses of the current round, in submission order
    pub guesses: Vec<Row>,
    /// Guests in join order
    pub guests: Vec<GuestId>,
    pub state: RoundState,
    pub outcome: Option<Outcome>,
}

impl Session {
    /// Create an empty session with the given id and answer
    pub fn new(id: SessionId, answer: String) -> Self {
        Self {
            id,
            answer,
            guesses: Vec::new(),
            guests: Vec::new(),
            state: RoundState::Playing,
            outcome: None,
        }
    }

    /// Check if a guest is in this session
    pub fn contains(&self, guest: &GuestId) -> bool {
        self.guests.contains(guest)
    }

    /// Add a guest; returns false if already present
    pub fn add_guest(&mut self, guest: GuestId) -> bool {
        if self.contains(&guest) {
            false
        } else {
            self.guests.push(guest);
            true
        }
    }

    /// Remove a guest; returns true if the session is now empty
    pub fn remove_guest(&mut self, guest: &GuestId) -> bool {
        self.guests.retain(|g| g != guest);
        self.guests.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    /// Guests other than `guest`, in join order
    pub fn others<'a>(&'a self, guest: &'a GuestId) -> impl Iterator<Item = &'a GuestId> + 'a {
        self.guests.iter().filter(move |g| *g != guest)
    }

    pub fn is_resetting(&self) -> bool {
        self.state == RoundState::Resetting
    }

    /// Start a new round with `answer`, keeping id and guests
    pub fn reset(&mut self, answer: String) {
        self.answer = answer;
        self.guesses.clear();
        self.outcome = None;
        self.state = RoundState::Resetting;
    }
}
