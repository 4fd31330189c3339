//! Leaderboard submission for a completed session.
//!
//! The flow validates the player name locally, hands out one ticket per
//! accepted name entry and only applies a response whose ticket is still
//! current; leaving the results screen invalidates outstanding tickets.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::quiz::{
    leaderboard::{EntryId, NameError, NewLeaderboardEntry, validate_player_name},
    session::SessionSummary,
};

/// Acknowledgement returned by the leaderboard once an entry is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Identifier allocated to the stored entry.
    pub entry_id: EntryId,
}

/// Reasons a name entry is not dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The name failed local validation.
    #[error(transparent)]
    InvalidName(#[from] NameError),
    /// A submission is already on its way.
    #[error("a submission is already in progress")]
    InFlight,
    /// The result was already stored.
    #[error("this result was already submitted")]
    AlreadySubmitted,
    /// No finished session is on screen.
    #[error("there is no finished session to submit")]
    NoResult,
}

/// Handle for one dispatched submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
    entry: NewLeaderboardEntry,
}

impl SubmissionTicket {
    /// Generation the response must match to be applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Payload to send to the leaderboard.
    pub fn entry(&self) -> &NewLeaderboardEntry {
        &self.entry
    }
}

/// Where the submission stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for a name.
    Idle,
    /// A request is in flight.
    Pending,
    /// Stored on the leaderboard.
    Accepted(Ack),
    /// The last attempt failed; the player may retry.
    Failed(String),
}

/// What happened to a response handed to [`SubmissionFlow::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The entry was stored.
    Accepted(Ack),
    /// The attempt failed and can be retried.
    Failed(String),
    /// The response belonged to an outdated ticket and was dropped.
    Stale,
}

/// Submission state for one completed session.
#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    summary: SessionSummary,
    generation: u64,
    state: SubmissionState,
}

impl SubmissionFlow {
    /// Flow for the given completed session.
    pub fn new(summary: SessionSummary) -> Self {
        Self {
            summary,
            generation: 0,
            state: SubmissionState::Idle,
        }
    }

    /// The session being submitted; untouched by failures.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Validate `raw_name` and, if accepted, issue the ticket to dispatch.
    ///
    /// Nothing is dispatched on an invalid name, while another attempt is in
    /// flight, or once the entry was accepted.
    pub fn prepare(&mut self, raw_name: &str) -> Result<SubmissionTicket, SubmitError> {
        match self.state {
            SubmissionState::Pending => return Err(SubmitError::InFlight),
            SubmissionState::Accepted(_) => return Err(SubmitError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
        }

        let player_name = validate_player_name(raw_name)?.to_owned();

        self.generation += 1;
        self.state = SubmissionState::Pending;
        debug!(generation = self.generation, "leaderboard submission dispatched");

        Ok(SubmissionTicket {
            generation: self.generation,
            entry: NewLeaderboardEntry {
                player_name,
                score: self.summary.score,
                total_questions: self.summary.total_questions,
                time_in_seconds: self.summary.time_in_seconds(),
            },
        })
    }

    /// Apply the response for the ticket of `generation`.
    pub fn complete(&mut self, generation: u64, result: Result<Ack, String>) -> Completion {
        if generation != self.generation || self.state != SubmissionState::Pending {
            debug!(
                generation,
                current = self.generation,
                "discarding stale submission response"
            );
            return Completion::Stale;
        }

        match result {
            Ok(ack) => {
                info!(entry_id = ack.entry_id, "score submitted to leaderboard");
                self.state = SubmissionState::Accepted(ack);
                Completion::Accepted(ack)
            }
            Err(message) => {
                warn!(error = %message, "leaderboard submission failed");
                self.state = SubmissionState::Failed(message.clone());
                Completion::Failed(message)
            }
        }
    }

    /// Invalidate any outstanding ticket (the player navigated away).
    pub fn cancel(&mut self) {
        self.generation += 1;
        if self.state == SubmissionState::Pending {
            self.state = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::quiz::session::Outcome;

    fn flow() -> SubmissionFlow {
        SubmissionFlow::new(SessionSummary {
            score: 7,
            total_questions: 10,
            elapsed: Duration::from_millis(95_900),
            outcomes: vec![Outcome::Correct; 7],
        })
    }

    #[test]
    fn invalid_names_are_rejected_without_ticket() {
        let mut flow = flow();
        assert_eq!(
            flow.prepare(""),
            Err(SubmitError::InvalidName(NameError::Empty))
        );
        assert_eq!(
            flow.prepare("sixteen chars!!!"),
            Err(SubmitError::InvalidName(NameError::TooLong { chars: 16 }))
        );
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }

    #[test]
    fn ticket_carries_session_figures() {
        let mut flow = flow();
        let ticket = flow.prepare(" Seedorf ").unwrap();

        assert_eq!(
            ticket.entry(),
            &NewLeaderboardEntry {
                player_name: "Seedorf".into(),
                score: 7,
                total_questions: 10,
                time_in_seconds: 95,
            }
        );
        assert_eq!(flow.state(), &SubmissionState::Pending);
    }

    #[test]
    fn one_dispatch_per_entry() {
        let mut flow = flow();
        let ticket = flow.prepare("Kaka").unwrap();
        assert_eq!(flow.prepare("Kaka"), Err(SubmitError::InFlight));

        let ack = Ack { entry_id: 3 };
        assert_eq!(
            flow.complete(ticket.generation(), Ok(ack)),
            Completion::Accepted(ack)
        );
        assert_eq!(flow.prepare("Kaka"), Err(SubmitError::AlreadySubmitted));
    }

    #[test]
    fn failure_is_retryable_and_keeps_summary() {
        let mut flow = flow();
        let ticket = flow.prepare("Raul").unwrap();
        assert_eq!(
            flow.complete(ticket.generation(), Err("server returned 500".into())),
            Completion::Failed("server returned 500".into())
        );
        assert_eq!(flow.summary().score, 7);
        assert_eq!(flow.summary().time_in_seconds(), 95);

        let retry = flow.prepare("Raul").unwrap();
        assert!(retry.generation() > ticket.generation());
    }

    #[test]
    fn late_response_after_cancel_is_discarded() {
        let mut flow = flow();
        let ticket = flow.prepare("Xavi").unwrap();
        flow.cancel();

        assert_eq!(
            flow.complete(ticket.generation(), Ok(Ack { entry_id: 1 })),
            Completion::Stale
        );
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }

    #[test]
    fn response_for_superseded_ticket_is_discarded() {
        let mut flow = flow();
        let first = flow.prepare("Pirlo").unwrap();
        flow.cancel();
        let second = flow.prepare("Pirlo").unwrap();

        assert_eq!(
            flow.complete(first.generation(), Err("timeout".into())),
            Completion::Stale
        );
        assert_eq!(
            flow.complete(second.generation(), Ok(Ack { entry_id: 9 })),
            Completion::Accepted(Ack { entry_id: 9 })
        );
    }
}
