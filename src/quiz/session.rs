//! Per-session quiz state machine.
//!
//! Each question goes `Active(time_left)` → `Resolved(outcome)` and only
//! [`QuizSessionController::advance`] moves on to the next question or to the
//! completed session. Ticks, answers and skips race to resolve the active
//! question; the first one wins and the others become no-ops.

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::quiz::{
    clock::{Clock, Stopwatch, SystemClock},
    countdown::{Countdown, CountdownTick, QUESTION_SECONDS},
    effects::{Cue, Effects, NoEffects, play_isolated},
    question::{OPTION_COUNT, Question},
};

/// Terminal resolution of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The selected option was the right one.
    Correct,
    /// The selected option was wrong.
    Incorrect,
    /// The player skipped the question.
    Skipped,
    /// The countdown ran out first.
    TimedOut,
}

impl Outcome {
    /// Whether this outcome scores a point.
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session has been started (or it was abandoned).
    Idle,
    /// The question at `index` is waiting for an outcome.
    Active {
        /// Position of the question in the session.
        index: usize,
        /// Countdown units left.
        time_left: u32,
    },
    /// The question at `index` has its outcome; waiting for `advance`.
    Resolved {
        /// Position of the question in the session.
        index: usize,
        /// How it was resolved.
        outcome: Outcome,
    },
    /// Every question was resolved and the session is over.
    Complete,
}

/// Events the host feeds into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// One unit of time elapsed.
    Tick,
    /// The player picked an option.
    SelectAnswer(usize),
    /// The player skipped the question.
    Skip,
    /// The player asked for the next question (or the results).
    Advance,
}

/// Effect of one event on the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The event was not valid in the current phase and changed nothing.
    Ignored,
    /// The countdown moved.
    Ticked {
        /// Units left.
        time_left: u32,
        /// Within the low-time window.
        low_time: bool,
    },
    /// The active question received its outcome.
    Resolved {
        /// Position of the resolved question.
        index: usize,
        /// The recorded outcome.
        outcome: Outcome,
    },
    /// The next question is active.
    Advanced {
        /// Position of the new active question.
        index: usize,
    },
    /// The last question was left behind; the session is complete.
    Completed(SessionSummary),
}

/// Final figures of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Questions answered correctly.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// Wall-clock time from start to completion.
    pub elapsed: Duration,
    /// Outcome of every question, in session order.
    pub outcomes: Vec<Outcome>,
}

impl SessionSummary {
    /// Elapsed time in whole seconds.
    pub fn time_in_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Errors raised when starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start_session` received no questions.
    #[error("a quiz session needs at least one question")]
    EmptyQuestionSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Active,
    Resolved(Outcome),
    Complete,
}

/// Drives one quiz session: sequencing, countdown, arbitration and scoring.
pub struct QuizSessionController {
    effects: Arc<dyn Effects>,
    clock: Arc<dyn Clock>,
    stage: Stage,
    questions: Vec<Question>,
    outcomes: Vec<Option<Outcome>>,
    index: usize,
    score: u32,
    countdown: Countdown,
    stopwatch: Option<Stopwatch>,
    summary: Option<SessionSummary>,
}

impl Default for QuizSessionController {
    fn default() -> Self {
        Self::new(Arc::new(NoEffects), Arc::new(SystemClock))
    }
}

impl QuizSessionController {
    /// Idle controller playing feedback through `effects` and timing with `clock`.
    pub fn new(effects: Arc<dyn Effects>, clock: Arc<dyn Clock>) -> Self {
        Self {
            effects,
            clock,
            stage: Stage::Idle,
            questions: Vec::new(),
            outcomes: Vec::new(),
            index: 0,
            score: 0,
            countdown: Countdown::stopped(),
            stopwatch: None,
            summary: None,
        }
    }

    /// Start a new session, discarding whatever the previous one left behind.
    ///
    /// The questions are played in the given order.
    pub fn start_session(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        self.outcomes = vec![None; questions.len()];
        self.questions = questions;
        self.index = 0;
        self.score = 0;
        self.countdown = Countdown::start(QUESTION_SECONDS);
        self.stopwatch = Some(Stopwatch::start(self.clock.now()));
        self.summary = None;
        self.stage = Stage::Active;

        info!(total = self.questions.len(), "quiz session started");
        Ok(())
    }

    /// Drop the running session without completing it. Timers stop immediately.
    pub fn abandon(&mut self) {
        if matches!(self.stage, Stage::Active | Stage::Resolved(_)) {
            info!(index = self.index, score = self.score, "quiz session abandoned");
        }
        self.countdown.stop();
        if let Some(stopwatch) = self.stopwatch.as_mut() {
            stopwatch.stop(self.clock.now());
        }
        self.stage = Stage::Idle;
    }

    /// Apply one event and report what it changed.
    pub fn handle(&mut self, event: QuizEvent) -> Step {
        match (self.stage, event) {
            (Stage::Active, QuizEvent::Tick) => self.on_tick(),
            (Stage::Active, QuizEvent::SelectAnswer(option)) => self.on_answer(option),
            (Stage::Active, QuizEvent::Skip) => self.resolve(Outcome::Skipped),
            (Stage::Resolved(_), QuizEvent::Advance) => self.on_advance(),
            (stage, event) => {
                debug!(?stage, ?event, index = self.index, "ignoring quiz event");
                Step::Ignored
            }
        }
    }

    /// One unit of time elapsed for the active question.
    pub fn tick(&mut self) -> Step {
        self.handle(QuizEvent::Tick)
    }

    /// Answer the active question with `option` (0-3).
    pub fn select_answer(&mut self, option: usize) -> Step {
        self.handle(QuizEvent::SelectAnswer(option))
    }

    /// Skip the active question.
    pub fn skip(&mut self) -> Step {
        self.handle(QuizEvent::Skip)
    }

    /// Leave a resolved question for the next one or for the results.
    pub fn advance(&mut self) -> Step {
        self.handle(QuizEvent::Advance)
    }

    /// Current phase, including the time left on an active question.
    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Idle => SessionPhase::Idle,
            Stage::Active => SessionPhase::Active {
                index: self.index,
                time_left: self.countdown.remaining(),
            },
            Stage::Resolved(outcome) => SessionPhase::Resolved {
                index: self.index,
                outcome,
            },
            Stage::Complete => SessionPhase::Complete,
        }
    }

    /// Whether the active question is still counting down.
    pub fn is_counting_down(&self) -> bool {
        self.stage == Stage::Active && self.countdown.is_running()
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Position of the current question while a session is in progress.
    pub fn current_index(&self) -> Option<usize> {
        match self.stage {
            Stage::Active | Stage::Resolved(_) => Some(self.index),
            Stage::Idle | Stage::Complete => None,
        }
    }

    /// Question currently on screen.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|index| self.questions.get(index))
    }

    /// Whether the current question is the last of the session.
    pub fn is_last_question(&self) -> bool {
        self.current_index()
            .is_some_and(|index| index + 1 == self.questions.len())
    }

    /// Questions of the current (or last) session, in play order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the session.
    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    /// Outcome recorded for each question so far.
    pub fn outcomes(&self) -> &[Option<Outcome>] {
        &self.outcomes
    }

    /// Wall-clock time since the session started; frozen once it ends.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch
            .map(|stopwatch| stopwatch.elapsed(self.clock.now()))
            .unwrap_or_default()
    }

    /// Final figures once the session is complete.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    fn on_tick(&mut self) -> Step {
        match self.countdown.tick() {
            CountdownTick::Stopped => Step::Ignored,
            CountdownTick::Running {
                remaining,
                low_time,
            } => {
                if low_time {
                    play_isolated(self.effects.as_ref(), Cue::Tick);
                }
                Step::Ticked {
                    time_left: remaining,
                    low_time,
                }
            }
            CountdownTick::Expired => self.resolve(Outcome::TimedOut),
        }
    }

    fn on_answer(&mut self, option: usize) -> Step {
        let Some(question) = self.questions.get(self.index) else {
            return Step::Ignored;
        };

        if option >= OPTION_COUNT {
            warn!(option, index = self.index, "ignoring out-of-range answer");
            return Step::Ignored;
        }

        let outcome = if question.is_correct(option) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.resolve(outcome)
    }

    /// Record `outcome` for the active question unless one is already recorded.
    fn resolve(&mut self, outcome: Outcome) -> Step {
        let index = self.index;
        let Some(slot) = self.outcomes.get_mut(index) else {
            return Step::Ignored;
        };
        if let Some(existing) = slot {
            debug!(index, ?existing, ?outcome, "question already resolved");
            return Step::Ignored;
        }

        *slot = Some(outcome);
        self.countdown.stop();
        if outcome.is_correct() {
            self.score += 1;
        }
        self.stage = Stage::Resolved(outcome);

        debug!(index, ?outcome, score = self.score, "question resolved");
        let cue = if outcome.is_correct() {
            Cue::Correct
        } else {
            Cue::Incorrect
        };
        play_isolated(self.effects.as_ref(), cue);

        Step::Resolved { index, outcome }
    }

    fn on_advance(&mut self) -> Step {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.countdown = Countdown::start(QUESTION_SECONDS);
            self.stage = Stage::Active;
            return Step::Advanced { index: self.index };
        }

        self.countdown.stop();
        let now = self.clock.now();
        let elapsed = self
            .stopwatch
            .as_mut()
            .map(|stopwatch| stopwatch.stop(now))
            .unwrap_or_default();

        let summary = SessionSummary {
            score: self.score,
            total_questions: self.total_questions(),
            elapsed,
            outcomes: self.outcomes.iter().flatten().copied().collect(),
        };
        self.summary = Some(summary.clone());
        self.stage = Stage::Complete;

        info!(
            score = summary.score,
            total = summary.total_questions,
            seconds = summary.time_in_seconds(),
            "quiz session complete"
        );
        play_isolated(self.effects.as_ref(), Cue::Success);

        Step::Completed(summary)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::quiz::{
        clock::testing::ManualClock,
        effects::testing::{BrokenEffects, PanickingEffects, RecordingEffects},
        question::Difficulty,
    };

    fn questions(n: u64) -> Vec<Question> {
        // Correct answer of question `id` is `id % 4`.
        (1..=n)
            .map(|id| {
                Question::builtin(
                    id,
                    "Who won?",
                    ["a", "b", "c", "d"],
                    (id % 4) as usize,
                    Difficulty::Medium,
                )
            })
            .collect()
    }

    fn controller() -> (QuizSessionController, Arc<RecordingEffects>, Arc<ManualClock>) {
        let effects = Arc::new(RecordingEffects::default());
        let clock = Arc::new(ManualClock::new());
        let controller = QuizSessionController::new(effects.clone(), clock.clone());
        (controller, effects, clock)
    }

    fn started(n: u64) -> (QuizSessionController, Arc<RecordingEffects>, Arc<ManualClock>) {
        let (mut controller, effects, clock) = controller();
        controller.start_session(questions(n)).unwrap();
        (controller, effects, clock)
    }

    fn correct_option(controller: &QuizSessionController) -> usize {
        controller.current_question().unwrap().correct_answer()
    }

    fn wrong_option(controller: &QuizSessionController) -> usize {
        (correct_option(controller) + 1) % OPTION_COUNT
    }

    fn run_out_the_clock(controller: &mut QuizSessionController) -> Step {
        let mut last = Step::Ignored;
        for _ in 0..QUESTION_SECONDS {
            last = controller.tick();
        }
        last
    }

    #[test]
    fn start_rejects_empty_set() {
        let (mut controller, _, _) = controller();
        assert_eq!(
            controller.start_session(Vec::new()),
            Err(SessionError::EmptyQuestionSet)
        );
        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    #[test]
    fn start_enters_first_question_with_full_time() {
        let (controller, _, _) = started(3);
        assert_eq!(
            controller.phase(),
            SessionPhase::Active {
                index: 0,
                time_left: QUESTION_SECONDS
            }
        );
        assert_eq!(controller.score(), 0);
        assert_eq!(controller.total_questions(), 3);
        assert!(controller.is_counting_down());
    }

    #[test]
    fn correct_answer_scores_once() {
        let (mut controller, effects, _) = started(2);
        let option = correct_option(&controller);

        assert_eq!(
            controller.select_answer(option),
            Step::Resolved {
                index: 0,
                outcome: Outcome::Correct
            }
        );
        assert_eq!(controller.select_answer(option), Step::Ignored);
        assert_eq!(controller.skip(), Step::Ignored);
        assert_eq!(controller.score(), 1);
        assert_eq!(effects.cues(), vec![Cue::Correct]);
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let (mut controller, effects, _) = started(1);
        let option = wrong_option(&controller);

        controller.select_answer(option);
        assert_eq!(controller.score(), 0);
        assert_eq!(
            controller.phase(),
            SessionPhase::Resolved {
                index: 0,
                outcome: Outcome::Incorrect
            }
        );
        assert_eq!(effects.cues(), vec![Cue::Incorrect]);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let (mut controller, _, _) = started(1);
        assert_eq!(controller.select_answer(OPTION_COUNT), Step::Ignored);
        assert!(matches!(controller.phase(), SessionPhase::Active { .. }));
    }

    #[test]
    fn timeout_resolves_without_score() {
        let (mut controller, effects, _) = started(1);

        assert_eq!(
            run_out_the_clock(&mut controller),
            Step::Resolved {
                index: 0,
                outcome: Outcome::TimedOut
            }
        );
        assert_eq!(controller.score(), 0);
        assert_eq!(effects.count(Cue::Tick), 5);
        assert_eq!(effects.count(Cue::Incorrect), 1);
    }

    #[test]
    fn answer_then_timeout_keeps_score() {
        let (mut controller, _, _) = started(1);
        for _ in 0..QUESTION_SECONDS - 1 {
            controller.tick();
        }
        let option = correct_option(&controller);

        controller.select_answer(option);
        let after_answer = controller.score();
        // The tick that would have expired the countdown arrives late.
        assert_eq!(controller.tick(), Step::Ignored);
        assert_eq!(controller.score(), after_answer);
        assert_eq!(controller.outcomes(), &[Some(Outcome::Correct)]);
    }

    #[test]
    fn timeout_then_answer_keeps_score() {
        let (mut controller, _, _) = started(1);
        let option = correct_option(&controller);

        run_out_the_clock(&mut controller);
        let after_timeout = controller.score();
        // The click lands after the countdown already expired.
        assert_eq!(controller.select_answer(option), Step::Ignored);
        assert_eq!(controller.score(), after_timeout);
        assert_eq!(controller.outcomes(), &[Some(Outcome::TimedOut)]);
    }

    #[test]
    fn no_tick_observed_after_resolution() {
        let (mut controller, effects, _) = started(2);
        for _ in 0..QUESTION_SECONDS - 3 {
            controller.tick();
        }
        controller.skip();
        let ticks_before = effects.count(Cue::Tick);

        for _ in 0..QUESTION_SECONDS * 2 {
            assert_eq!(controller.tick(), Step::Ignored);
        }
        assert_eq!(effects.count(Cue::Tick), ticks_before);
        assert_eq!(
            controller.phase(),
            SessionPhase::Resolved {
                index: 0,
                outcome: Outcome::Skipped
            }
        );
    }

    #[test]
    fn no_tick_observed_after_completion() {
        let (mut controller, effects, _) = started(1);
        controller.skip();
        controller.advance();
        let cues = effects.cues();

        for _ in 0..QUESTION_SECONDS * 2 {
            assert_eq!(controller.tick(), Step::Ignored);
        }
        assert_eq!(effects.cues(), cues);
        assert_eq!(controller.phase(), SessionPhase::Complete);
    }

    #[test]
    fn advance_requires_resolution() {
        let (mut controller, _, _) = started(2);
        assert_eq!(controller.advance(), Step::Ignored);
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn advance_restarts_countdown() {
        let (mut controller, _, _) = started(2);
        for _ in 0..7 {
            controller.tick();
        }
        controller.skip();

        assert_eq!(controller.advance(), Step::Advanced { index: 1 });
        assert_eq!(
            controller.phase(),
            SessionPhase::Active {
                index: 1,
                time_left: QUESTION_SECONDS
            }
        );
        assert!(controller.is_last_question());
    }

    #[test]
    fn completion_happens_exactly_once() {
        let (mut controller, effects, clock) = started(1);
        controller.skip();
        clock.advance(Duration::from_secs(42));

        let Step::Completed(summary) = controller.advance() else {
            panic!("expected completion");
        };
        assert_eq!(summary.time_in_seconds(), 42);
        assert_eq!(controller.advance(), Step::Ignored);
        assert_eq!(effects.count(Cue::Success), 1);

        clock.advance(Duration::from_secs(100));
        assert_eq!(controller.elapsed(), Duration::from_secs(42));
        assert_eq!(controller.summary(), Some(&summary));
    }

    #[test]
    fn three_question_walkthrough() {
        let (mut controller, _, _) = started(3);

        let option = correct_option(&controller);
        controller.select_answer(option);
        controller.advance();

        run_out_the_clock(&mut controller);
        controller.advance();

        controller.skip();
        let Step::Completed(summary) = controller.advance() else {
            panic!("expected completion");
        };

        assert_eq!(summary.score, 1);
        assert_eq!(summary.total_questions, 3);
        assert_eq!(
            summary.outcomes,
            vec![Outcome::Correct, Outcome::TimedOut, Outcome::Skipped]
        );
        assert!(controller.outcomes().iter().all(Option::is_some));
    }

    #[test]
    fn restart_resets_state() {
        let (mut controller, _, _) = started(1);
        let option = correct_option(&controller);
        controller.select_answer(option);
        controller.advance();

        controller.start_session(questions(2)).unwrap();
        assert_eq!(controller.score(), 0);
        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.outcomes(), &[None, None]);
        assert!(controller.summary().is_none());
    }

    #[test]
    fn abandon_stops_timers() {
        let (mut controller, effects, clock) = started(2);
        clock.advance(Duration::from_secs(3));
        controller.abandon();
        clock.advance(Duration::from_secs(30));

        assert_eq!(controller.tick(), Step::Ignored);
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert_eq!(controller.elapsed(), Duration::from_secs(3));
        assert!(effects.cues().is_empty());
    }

    #[test]
    fn failing_effects_never_affect_state() {
        for effects in [
            Arc::new(BrokenEffects) as Arc<dyn Effects>,
            Arc::new(PanickingEffects) as Arc<dyn Effects>,
        ] {
            let mut controller = QuizSessionController::new(effects, Arc::new(ManualClock::new()));
            controller.start_session(questions(2)).unwrap();

            let option = correct_option(&controller);
            controller.select_answer(option);
            controller.advance();
            run_out_the_clock(&mut controller);
            let step = controller.advance();

            assert!(matches!(step, Step::Completed(SessionSummary { score: 1, .. })));
        }
    }

    #[test]
    fn random_event_streams_respect_score_bounds() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let total = rng.random_range(1..=6);
            let (mut controller, _, _) = started(total);

            for _ in 0..400 {
                let event = match rng.random_range(0..4) {
                    0 => QuizEvent::Tick,
                    1 => QuizEvent::SelectAnswer(rng.random_range(0..OPTION_COUNT)),
                    2 => QuizEvent::Skip,
                    _ => QuizEvent::Advance,
                };
                controller.handle(event);
                assert!(controller.score() <= controller.total_questions());
            }

            let correct = controller
                .outcomes()
                .iter()
                .flatten()
                .filter(|outcome| outcome.is_correct())
                .count() as u32;
            assert_eq!(controller.score(), correct);
        }
    }
}
