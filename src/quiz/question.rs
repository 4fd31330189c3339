//! Question model plus the ordering and sampling helpers used to assemble a session.

use std::fmt;

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Identifier allocated to a question by the repository.
pub type QuestionId = u64;

/// Difficulty tier, only used to order a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Warm-up questions shown first.
    Easy,
    /// Middle of the session.
    Medium,
    /// Saved for the end.
    Hard,
}

impl Difficulty {
    /// Ordering rank (easy = 1, medium = 2, hard = 3).
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Lowercase label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a question cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The prompt is blank.
    #[error("question prompt must not be empty")]
    EmptyPrompt,
    /// Anything other than four options was supplied.
    #[error("question must have exactly 4 options (got {0})")]
    OptionCount(usize),
    /// The correct answer does not point at one of the options.
    #[error("correct answer index {0} is out of range (expected 0-3)")]
    CorrectAnswerOutOfRange(usize),
}

/// A single multiple-choice trivia question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_answer: usize,
    difficulty: Difficulty,
}

impl Question {
    /// Build a question, checking the option count and the correct answer index.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let count = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::OptionCount(count))?;

        if correct_answer >= OPTION_COUNT {
            return Err(QuestionError::CorrectAnswerOutOfRange(correct_answer));
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_answer,
            difficulty,
        })
    }

    /// Build one of the baked-in catalog questions.
    pub(crate) fn builtin(
        id: QuestionId,
        prompt: &str,
        options: [&str; OPTION_COUNT],
        correct_answer: usize,
        difficulty: Difficulty,
    ) -> Self {
        debug_assert!(correct_answer < OPTION_COUNT);
        Self {
            id,
            prompt: prompt.to_owned(),
            options: options.map(str::to_owned),
            correct_answer,
            difficulty,
        }
    }

    /// Repository identifier.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Question text shown to the player.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The four answer options in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index (0-3) of the correct option.
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    /// Difficulty tier of the question.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether `option` is the correct answer.
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }

    /// Same question under a different identifier.
    pub fn with_id(mut self, id: QuestionId) -> Self {
        self.id = id;
        self
    }
}

/// Order questions easy → medium → hard, keeping the input order inside a tier.
pub fn sort_by_difficulty(mut questions: Vec<Question>) -> Vec<Question> {
    // `sort_by_key` is stable.
    questions.sort_by_key(|question| question.difficulty().rank());
    questions
}

/// Shuffle a copy of `questions` (Fisher-Yates) and keep the first `count` of them.
pub fn sample_random<R>(questions: &[Question], count: usize, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut sampled = questions.to_vec();
    sampled.shuffle(rng);
    sampled.truncate(count.min(questions.len()));
    sampled
}
