//! WordRow codec
//!
//! A `Row` is a word spelled out as letters, each carrying an evaluation
//! state. Rows leave `word_to_row` unscored; only the guess engine fills in
//! the states.

use serde::{Deserialize, Serialize};

/// Evaluation state of a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterState {
    /// Not scored yet
    Unknown,
    /// Right letter, right position
    Correct,
    /// Letter occurs elsewhere in the answer
    Present,
    /// Letter does not occur (or all its occurrences are already credited)
    Absent,
}

/// One letter of a row together with its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub letter: char,
    pub state: LetterState,
}

/// Ordered sequence of letters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Letter>);

impl Row {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// True iff the row is non-empty and every letter is `Correct`
    pub fn is_correct(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|l| l.state == LetterState::Correct)
    }
}

/// Split a word into unscored letters (lower-cased)
pub fn word_to_row(word: &str) -> Row {
    Row(word
        .chars()
        .flat_map(char::to_lowercase)
        .map(|letter| Letter {
            letter,
            state: LetterState::Unknown,
        })
        .collect())
}

/// Join a row's letters back into a word
pub fn row_to_word(row: &Row) -> String {
    row.0.iter().map(|l| l.letter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_to_row_unscored() {
        let row = word_to_row("Crane");
        assert_eq!(row.len(), 5);
        assert_eq!(row.letters()[0].letter, 'c');
        assert!(row.letters().iter().all(|l| l.state == LetterState::Unknown));
        assert!(!row.is_correct());
    }

    #[test]
    fn test_row_to_word() {
        assert_eq!(row_to_word(&word_to_row("llama")), "llama");
    }

    #[test]
    fn test_empty_row_is_not_correct() {
        assert!(!word_to_row("").is_correct());
    }

    #[test]
    fn test_row_serialize() {
        let mut row = word_to_row("ab");
        row.0[0].state = LetterState::Correct;
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"[{"letter":"a","state":"correct"},{"letter":"b","state":"unknown"}]"#
        );
    }
}
