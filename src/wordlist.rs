//! Word and name lists
//!
//! `WordList` holds the accepted guesses and the answer pool (accepted words
//! of the configured length). Session ids are built from the same list.
//! `Names` is the pool of display identities handed to new connections; a
//! name stays reserved until its connection goes away.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::AppError;

const EMBEDDED_WORDS: &str = include_str!("../data/words.txt");
const EMBEDDED_NAMES: &str = include_str!("../data/names.txt");

/// Split a newline separated list into unique lower-case entries, keeping
/// first-seen order so seeded draws are reproducible.
fn parse_lines(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty() && seen.insert(word.clone()))
        .collect()
}

/// Accepted words and the answer pool derived from them
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    lookup: HashSet<String>,
    answers: Vec<String>,
    answer_length: usize,
}

impl WordList {
    /// Build a word list from newline separated text
    ///
    /// Fails if no word has `answer_length` letters, since then no session
    /// could ever be given an answer.
    pub fn parse(text: &str, answer_length: usize) -> Result<Self, AppError> {
        let words = parse_lines(text);
        let answers: Vec<String> = words
            .iter()
            .filter(|w| w.chars().count() == answer_length)
            .cloned()
            .collect();
        if answers.is_empty() {
            return Err(AppError::EmptyWordList(answer_length));
        }
        let lookup = words.iter().cloned().collect();
        Ok(Self {
            words,
            lookup,
            answers,
            answer_length,
        })
    }

    /// Load a word list from a file
    pub fn from_path(path: impl AsRef<Path>, answer_length: usize) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, answer_length)
    }

    /// The list compiled into the binary
    pub fn embedded(answer_length: usize) -> Result<Self, AppError> {
        Self::parse(EMBEDDED_WORDS, answer_length)
    }

    /// Case-insensitive membership check
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_lowercase())
    }

    pub fn answer_length(&self) -> usize {
        self.answer_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Any accepted word, used for session ids
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `parse` guarantees at least one answer, hence at least one word
        self.words.choose(rng).map(String::as_str).unwrap_or_default()
    }

    /// A word of the answer length
    pub fn random_answer<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.answers.choose(rng).map(String::as_str).unwrap_or_default()
    }
}

/// Pool of display identities with their reservation flags
#[derive(Debug, Clone, Default)]
pub struct Names {
    pool: Vec<String>,
    reserved: HashSet<String>,
}

impl Names {
    pub fn parse(text: &str) -> Self {
        Self {
            pool: parse_lines(text),
            reserved: HashSet::new(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_NAMES)
    }

    /// Reserve a random free name, or `None` when every name is taken
    pub fn reserve<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let free: Vec<&String> = self
            .pool
            .iter()
            .filter(|name| !self.reserved.contains(*name))
            .collect();
        let name = (*free.choose(rng)?).clone();
        self.reserved.insert(name.clone());
        Some(name)
    }

    /// Free a name; unknown names are ignored
    pub fn release(&mut self, name: &str) {
        self.reserved.remove(name);
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn available(&self) -> usize {
        self.pool.len() - self.reserved.len()
    }
}
