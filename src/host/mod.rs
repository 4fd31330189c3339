//! Screen flow around a quiz session: start, quiz, results and leaderboard.
//!
//! [`QuizHost`] is synchronous; [`driver`] feeds it ticks, player commands and
//! network completions from a single event loop.

pub mod driver;

use tracing::{debug, info};

use crate::{
    client::supply::{QuestionSource, QuestionSupply},
    quiz::{
        QuizEvent, QuizSessionController, SessionError, Step,
        leaderboard::LeaderboardEntry,
        session::SessionSummary,
        submission::{Ack, Completion, SubmissionFlow, SubmissionState, SubmissionTicket, SubmitError},
    },
};

/// Screen currently shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Welcome screen.
    Start,
    /// A session is being played.
    Quiz,
    /// Final score of the last session.
    Results,
    /// Ranked leaderboard.
    Leaderboard,
}

/// Transient message surfaced to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Questions could not be fetched; the backup set is in use.
    BackupQuestions,
    /// The typed name was rejected locally.
    InvalidName(String),
    /// The score was stored.
    ScoreSaved,
    /// Saving the score failed; the player may retry.
    SubmitFailed(String),
    /// The leaderboard could not be loaded.
    LeaderboardUnavailable(String),
}

/// Screen state machine wrapped around one [`QuizSessionController`].
pub struct QuizHost {
    screen: Screen,
    controller: QuizSessionController,
    submission: Option<SubmissionFlow>,
    name_entry_open: bool,
    leaderboard: Vec<LeaderboardEntry>,
    notices: Vec<Notice>,
}

impl QuizHost {
    /// Host showing the start screen.
    pub fn new(controller: QuizSessionController) -> Self {
        Self {
            screen: Screen::Start,
            controller,
            submission: None,
            name_entry_open: false,
            leaderboard: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Start (or restart) a session with the supplied questions.
    pub fn begin(&mut self, supply: QuestionSupply) -> Result<(), SessionError> {
        self.cancel_submission();
        self.controller.start_session(supply.questions)?;
        if supply.source == QuestionSource::Backup {
            self.notices.push(Notice::BackupQuestions);
        }
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// Forward a session event. Only the quiz screen accepts them.
    pub fn handle(&mut self, event: QuizEvent) -> Step {
        if self.screen != Screen::Quiz {
            return Step::Ignored;
        }

        let step = self.controller.handle(event);
        if let Step::Completed(summary) = &step {
            self.submission = Some(SubmissionFlow::new(summary.clone()));
            self.name_entry_open = false;
            self.screen = Screen::Results;
        }
        step
    }

    /// Show the name prompt on the results screen.
    pub fn open_name_entry(&mut self) {
        if self.screen == Screen::Results && !self.is_submitted() {
            self.name_entry_open = true;
        }
    }

    /// Hide the name prompt.
    pub fn close_name_entry(&mut self) {
        self.name_entry_open = false;
    }

    /// Validate the typed name and return the submission to dispatch.
    pub fn submit_name(&mut self, raw_name: &str) -> Result<SubmissionTicket, SubmitError> {
        let on_results = self.screen == Screen::Results;
        let Some(flow) = self.submission.as_mut().filter(|_| on_results) else {
            debug!("no finished session to submit");
            return Err(SubmitError::NoResult);
        };

        let ticket = flow.prepare(raw_name);
        if let Err(SubmitError::InvalidName(err)) = &ticket {
            self.notices.push(Notice::InvalidName(err.to_string()));
        }
        ticket
    }

    /// Apply the response to the submission of `generation`.
    pub fn complete_submission(&mut self, generation: u64, result: Result<Ack, String>) -> Completion {
        let Some(flow) = self.submission.as_mut() else {
            return Completion::Stale;
        };

        let completion = flow.complete(generation, result);
        match &completion {
            Completion::Accepted(_) => {
                self.name_entry_open = false;
                self.notices.push(Notice::ScoreSaved);
                self.screen = Screen::Leaderboard;
            }
            Completion::Failed(message) => {
                self.notices.push(Notice::SubmitFailed(message.clone()));
            }
            Completion::Stale => {}
        }
        completion
    }

    /// Whether the leaderboard may be opened from the current screen.
    ///
    /// A running session has to be finished or abandoned first.
    pub fn can_show_leaderboard(&self) -> bool {
        self.screen != Screen::Quiz
    }

    /// Leave the results screen: any submission still in flight is invalidated.
    ///
    /// The finished session stays available; only its pending ticket is dropped.
    pub fn leave_results(&mut self) {
        if let Some(flow) = self.submission.as_mut() {
            flow.cancel();
        }
        self.name_entry_open = false;
    }

    /// Show the leaderboard with freshly loaded entries.
    ///
    /// Ignored while a session is being played. Returns whether the screen changed.
    pub fn show_leaderboard(&mut self, entries: Vec<LeaderboardEntry>) -> bool {
        if !self.can_show_leaderboard() {
            debug!("leaderboard requested during a session; ignoring");
            return false;
        }

        self.leave_results();
        self.leaderboard = entries;
        self.screen = Screen::Leaderboard;
        true
    }

    /// Record that the leaderboard could not be loaded.
    pub fn leaderboard_unavailable(&mut self, message: String) {
        self.notices.push(Notice::LeaderboardUnavailable(message));
    }

    /// Return to the start screen, dropping the session and any pending submission.
    pub fn back_to_start(&mut self) {
        self.cancel_submission();
        self.controller.abandon();
        self.name_entry_open = false;
        self.screen = Screen::Start;
        info!("returned to start screen");
    }

    /// Take the notices raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Underlying session controller.
    pub fn controller(&self) -> &QuizSessionController {
        &self.controller
    }

    /// Whether the countdown of the active question is running.
    pub fn is_counting_down(&self) -> bool {
        self.screen == Screen::Quiz && self.controller.is_counting_down()
    }

    /// Whether the name prompt is showing.
    pub fn is_name_entry_open(&self) -> bool {
        self.name_entry_open
    }

    /// Figures of the last completed session.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.submission.as_ref().map(SubmissionFlow::summary)
    }

    /// State of the score submission, if a session was completed.
    pub fn submission_state(&self) -> Option<&SubmissionState> {
        self.submission.as_ref().map(SubmissionFlow::state)
    }

    /// Entries last loaded for the leaderboard screen.
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    fn is_submitted(&self) -> bool {
        matches!(self.submission_state(), Some(SubmissionState::Accepted(_)))
    }

    fn cancel_submission(&mut self) {
        if let Some(mut flow) = self.submission.take() {
            flow.cancel();
        }
    }
}
