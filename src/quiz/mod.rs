/// Built-in question pool and backup set.
pub mod catalog;
/// Wall-clock source for session timing.
pub mod clock;
/// Per-question countdown.
pub mod countdown;
/// Feedback cues and the effects capability.
pub mod effects;
/// Leaderboard entries, ranking and player name rules.
pub mod leaderboard;
/// Question model, ordering and sampling.
pub mod question;
/// Results screen helpers.
pub mod scoring;
/// Quiz session state machine.
pub mod session;
/// Leaderboard submission flow.
pub mod submission;

pub use self::question::{Difficulty, Question, sample_random, sort_by_difficulty};
pub use self::session::{
    Outcome, QuizEvent, QuizSessionController, SessionError, SessionPhase, SessionSummary, Step,
};
