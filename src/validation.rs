//! Guess validation
//!
//! Structural checks run before a guess reaches a session. A rejected
//! guess never mutates anything.

use crate::error::AppError;
use crate::wordlist::WordList;

/// Check a raw guess and return it normalised to lower case
pub fn validate_guess(raw: &str, words: &WordList) -> Result<String, AppError> {
    let guess = raw.trim().to_lowercase();

    if !guess.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidGuess(format!(
            "'{}' must contain only letters",
            raw
        )));
    }

    let len = guess.chars().count();
    if len != words.answer_length() {
        return Err(AppError::InvalidGuess(format!(
            "guess must be {} letters, got {}",
            words.answer_length(),
            len
        )));
    }

    if !words.contains(&guess) {
        return Err(AppError::InvalidGuess(format!("'{}' is not in the word list", guess)));
    }

    Ok(guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> WordList {
        WordList::parse("crane\nslate\nox\n", 5).unwrap()
    }

    #[test]
    fn test_valid_guess_normalised() {
        assert_eq!(validate_guess(" CRANE ", &words()).unwrap(), "crane");
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            validate_guess("ox", &words()),
            Err(AppError::InvalidGuess(_))
        ));
    }

    #[test]
    fn test_non_letters() {
        assert!(matches!(
            validate_guess("cr4ne", &words()),
            Err(AppError::InvalidGuess(_))
        ));
    }

    #[test]
    fn test_unknown_word() {
        assert!(matches!(
            validate_guess("zzzzz", &words()),
            Err(AppError::InvalidGuess(_))
        ));
    }
}
