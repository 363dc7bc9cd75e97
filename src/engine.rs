//! Guess evaluation
//!
//! Two-pass scoring with standard duplicate-letter handling: exact matches
//! are credited first, then remaining letters are marked present only while
//! the answer still has unclaimed copies of them.

use std::collections::HashMap;

use crate::row::{LetterState, Row};

/// Result of scoring one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub row: Row,
    pub is_correct: bool,
}

/// Score `guess` against `answer`
///
/// Rows are expected to have equal length; positions past the end of the
/// answer are never correct and can only be present.
pub fn evaluate(guess: &Row, answer: &Row) -> Evaluation {
    let mut remaining: HashMap<char, usize> = HashMap::new();
    for l in answer.letters() {
        *remaining.entry(l.letter).or_default() += 1;
    }

    let mut row = guess.clone();
    for l in row.0.iter_mut() {
        l.state = LetterState::Unknown;
    }

    // Pass 1: exact positions
    for (i, l) in row.0.iter_mut().enumerate() {
        if answer.letters().get(i).map(|a| a.letter) == Some(l.letter) {
            l.state = LetterState::Correct;
            if let Some(count) = remaining.get_mut(&l.letter) {
                *count -= 1;
            }
        }
    }

    // Pass 2: misplaced letters, bounded by unclaimed copies
    for l in row.0.iter_mut() {
        if l.state == LetterState::Correct {
            continue;
        }
        l.state = match remaining.get_mut(&l.letter) {
            Some(count) if *count > 0 => {
                *count -= 1;
                LetterState::Present
            }
            _ => LetterState::Absent,
        };
    }

    let is_correct = row.is_correct() && row.len() == answer.len();
    Evaluation { row, is_correct }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::word_to_row;
    use LetterState::{Absent, Correct, Present};

    fn states(guess: &str, answer: &str) -> Vec<LetterState> {
        evaluate(&word_to_row(guess), &word_to_row(answer))
            .row
            .letters()
            .iter()
            .map(|l| l.state)
            .collect()
    }

    #[test]
    fn test_duplicate_letters_credited_once() {
        assert_eq!(
            states("lolly", "allow"),
            vec![Present, Present, Correct, Absent, Absent]
        );
    }

    #[test]
    fn test_llama_alarm() {
        // The answer's single 'l' is claimed by the exact match
        assert_eq!(
            states("llama", "alarm"),
            vec![Absent, Correct, Correct, Present, Present]
        );
    }

    #[test]
    fn test_correct_resolved_before_present() {
        // The trailing 'e' is exact; the leading one must not steal its credit
        assert_eq!(
            states("eerie", "crane"),
            vec![Absent, Absent, Present, Absent, Correct]
        );
    }

    #[test]
    fn test_all_correct() {
        let eval = evaluate(&word_to_row("crane"), &word_to_row("crane"));
        assert!(eval.is_correct);
        assert!(eval.row.letters().iter().all(|l| l.state == Correct));
    }

    #[test]
    fn test_not_correct() {
        let eval = evaluate(&word_to_row("crate"), &word_to_row("crane"));
        assert!(!eval.is_correct);
    }

    #[test]
    fn test_credit_never_exceeds_answer_count() {
        let pairs = [
            ("lolly", "allow"),
            ("sassy", "asset"),
            ("geese", "eerie"),
            ("mamma", "drama"),
            ("abbey", "babes"),
        ];
        for (guess, answer) in pairs {
            let eval = evaluate(&word_to_row(guess), &word_to_row(answer));
            for (i, l) in eval.row.letters().iter().enumerate() {
                let exact = answer.chars().nth(i) == Some(l.letter);
                assert_eq!(l.state == Correct, exact, "{} vs {} at {}", guess, answer, i);
            }
            for c in guess.chars() {
                let credited = eval
                    .row
                    .letters()
                    .iter()
                    .filter(|l| l.letter == c && l.state != Absent)
                    .count();
                let in_answer = answer.chars().filter(|&a| a == c).count();
                assert!(credited <= in_answer, "{} vs {}: '{}'", guess, answer, c);
            }
        }
    }
}
