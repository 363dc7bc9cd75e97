//! Round coordination: guesses, win/loss detection, replays and the
//! "play again" reset.

use tracing::{debug, info, warn};

use crate::engine::evaluate;
use crate::error::AppError;
use crate::event_log::LogEvent;
use crate::message::{GuessPayload, ServerMessage};
use crate::row::word_to_row;
use crate::server::GameServer;
use crate::session::{Outcome, RoundState};
use crate::types::{ConnectionId, SessionId};
use crate::validation::validate_guess;

/// A "play again" answer counts as yes iff it starts with `y`
fn is_affirmative(content: Option<&str>) -> bool {
    content
        .map(|c| c.trim_start().starts_with(['y', 'Y']))
        .unwrap_or(false)
}

fn loss_prompt(session_id: &SessionId, answer: &str) -> ServerMessage {
    ServerMessage::Again {
        session_id: session_id.to_string(),
        winner: None,
        answer: Some(answer.to_string()),
        content: format!("no more guesses! the answer was {}", answer),
    }
}

impl GameServer {
    /// Evaluate a guess, record it and fan the result out to the session
    pub(crate) fn submit_guess(
        &mut self,
        connection_id: ConnectionId,
        session_id: &str,
        raw_guess: &str,
    ) {
        let Some(submitter) = self.connections.get(connection_id).map(|c| c.guest.clone()) else {
            return;
        };

        let word = match validate_guess(raw_guess, self.registry.words()) {
            Ok(word) => word,
            Err(e) => {
                debug!("Rejected guess from {}: {}", submitter, e);
                self.send_error(connection_id, e);
                return;
            }
        };

        let session_id = SessionId::from_string(session_id);
        let max_guesses = self.max_guesses;

        let session = match self.registry.require_mut(&session_id) {
            Ok(session) => session,
            Err(e) => {
                self.send_error(connection_id, e);
                return;
            }
        };

        if matches!(session.outcome, Some(Outcome::Won { .. })) {
            self.send_error(connection_id, AppError::RoundOver);
            return;
        }

        if session.guesses.len() >= max_guesses {
            let prompt = loss_prompt(&session_id, &session.answer);
            self.connections.send_to(connection_id, prompt);
            return;
        }

        let evaluation = evaluate(&word_to_row(&word), &word_to_row(&session.answer));
        session.guesses.push(evaluation.row.clone());
        let guessed = session.guesses.len();

        if evaluation.is_correct {
            session.state = RoundState::Playing;
            session.outcome = Some(Outcome::Won {
                winner: submitter.clone(),
            });
        } else if guessed >= max_guesses {
            session.outcome = Some(Outcome::Lost);
        }

        let guests = session.guests.clone();
        let answer = session.answer.clone();
        let outcome = session.outcome.clone();

        self.log_event(LogEvent::Guessed {
            session_id: session_id.to_string(),
            guess: word,
            answer: answer.clone(),
        });

        self.connections.broadcast(
            &guests,
            &ServerMessage::Guess {
                session_id: session_id.to_string(),
                content: GuessPayload {
                    guess: evaluation.row,
                    rem: max_guesses.saturating_sub(guessed),
                },
            },
        );

        match outcome {
            Some(Outcome::Won { winner }) => {
                info!("{} won session {} with {}", winner, session_id, answer);
                self.connections.broadcast(
                    &guests,
                    &ServerMessage::Again {
                        session_id: session_id.to_string(),
                        winner: Some(winner.to_string()),
                        answer: None,
                        content: format!("correct! winner: {}", winner),
                    },
                );
            }
            Some(Outcome::Lost) => {
                info!("Session {} ran out of guesses ({})", session_id, answer);
                self.connections.broadcast(&guests, &loss_prompt(&session_id, &answer));
            }
            None => {}
        }
    }

    /// Handle an answer to the "play again?" prompt
    ///
    /// "No" (or no answer) says goodbye and leaves. The first "yes" of a
    /// round from one of the session's guests resets it and tells every
    /// guest; later ones, while the reset gate is held, only get the current
    /// guesses replayed.
    pub(crate) fn respond_again(
        &mut self,
        connection_id: ConnectionId,
        session_id: &str,
        content: Option<&str>,
    ) {
        let Some(voter) = self.connections.get(connection_id).map(|c| c.guest.clone()) else {
            return;
        };

        if !is_affirmative(content) {
            self.connections.send_to(
                connection_id,
                ServerMessage::Info {
                    session_id: None,
                    content: "goodbye!".to_string(),
                },
            );
            self.leave(connection_id);
            self.close_connection(connection_id);
            return;
        }

        let session_id = SessionId::from_string(session_id);
        let session = match self.registry.require_mut(&session_id) {
            Ok(session) => session,
            Err(e) => {
                self.send_error(connection_id, e);
                return;
            }
        };

        if !session.contains(&voter) {
            warn!("{} voted to replay session {} without joining it", voter, session_id);
            self.send_error(connection_id, AppError::NotInSession(session_id.to_string()));
            return;
        }

        if session.is_resetting() {
            debug!("Session {} already resetting, replaying for {}", session_id, voter);
            self.replay(connection_id, &session_id);
            return;
        }

        let answer = self.registry.new_answer();
        let Ok(session) = self.registry.require_mut(&session_id) else {
            return;
        };
        session.reset(answer.clone());
        let guests = session.guests.clone();

        info!("Session {} reset by {}", session_id, voter);
        self.log_event(LogEvent::Reset {
            session_id: session_id.to_string(),
            answer,
            reset: true,
        });

        self.connections.broadcast(
            &guests,
            &ServerMessage::Info {
                session_id: Some(session_id.to_string()),
                content: format!("new round started by {}", voter),
            },
        );
    }

    /// Send a session's guesses to one connection, annotated with the
    /// remaining-guess count each had when it was made
    pub(crate) fn replay(&self, connection_id: ConnectionId, session_id: &SessionId) {
        let Some(session) = self.registry.get(session_id) else {
            return;
        };

        for (index, row) in session.guesses.iter().enumerate() {
            let msg = ServerMessage::Guess {
                session_id: session_id.to_string(),
                content: GuessPayload {
                    guess: row.clone(),
                    rem: self.max_guesses.saturating_sub(index + 1),
                },
            };
            self.connections.send_to(connection_id, msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative(Some("y")));
        assert!(is_affirmative(Some("Yes")));
        assert!(is_affirmative(Some("  yep")));
        assert!(!is_affirmative(Some("n")));
        assert!(!is_affirmative(Some("")));
        assert!(!is_affirmative(Some("okay")));
        assert!(!is_affirmative(None));
    }

    #[test]
    fn test_loss_prompt_reveals_answer() {
        let msg = loss_prompt(&SessionId::from_words("apple", "crane"), "slate");
        match msg {
            ServerMessage::Again {
                session_id,
                winner,
                answer,
                content,
            } => {
                assert_eq!(session_id, "apple-crane");
                assert!(winner.is_none());
                assert_eq!(answer.as_deref(), Some("slate"));
                assert!(content.contains("slate"));
            }
            other => panic!("expected again, got {:?}", other),
        }
    }
}
