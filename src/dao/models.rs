use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::quiz::{
    leaderboard::{EntryId, LeaderboardEntry, NewLeaderboardEntry},
    question::{Difficulty, Question, QuestionError, QuestionId},
};

/// Stored question row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Identifier allocated by the store.
    pub id: QuestionId,
    /// Question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct_answer: usize,
    /// Difficulty tier.
    pub difficulty: Difficulty,
}

/// Question waiting for an identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewQuestionEntity {
    /// Question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct_answer: usize,
    /// Difficulty tier.
    pub difficulty: Difficulty,
}

impl NewQuestionEntity {
    /// Attach the identifier allocated by the store.
    pub fn with_id(self, id: QuestionId) -> QuestionEntity {
        QuestionEntity {
            id,
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            difficulty: self.difficulty,
        }
    }
}

/// Stored leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntryEntity {
    /// Identifier allocated by the store.
    pub id: EntryId,
    /// Trimmed player name.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// Session duration in seconds.
    pub time_in_seconds: u64,
    /// Insertion timestamp.
    pub date: SystemTime,
}

/// Leaderboard row waiting for an identifier and a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewLeaderboardEntryEntity {
    /// Trimmed player name.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// Session duration in seconds.
    pub time_in_seconds: u64,
}

impl NewLeaderboardEntryEntity {
    /// Attach the identifier and timestamp allocated by the store.
    pub fn into_entity(self, id: EntryId, date: SystemTime) -> LeaderboardEntryEntity {
        LeaderboardEntryEntity {
            id,
            player_name: self.player_name,
            score: self.score,
            total_questions: self.total_questions,
            time_in_seconds: self.time_in_seconds,
            date,
        }
    }
}

impl From<Question> for NewQuestionEntity {
    fn from(value: Question) -> Self {
        Self {
            question: value.prompt().to_owned(),
            options: value.options().to_vec(),
            correct_answer: value.correct_answer(),
            difficulty: value.difficulty(),
        }
    }
}

impl TryFrom<QuestionEntity> for Question {
    type Error = QuestionError;

    fn try_from(value: QuestionEntity) -> Result<Self, Self::Error> {
        Question::new(
            value.id,
            value.question,
            value.options,
            value.correct_answer,
            value.difficulty,
        )
    }
}

impl From<NewLeaderboardEntry> for NewLeaderboardEntryEntity {
    fn from(value: NewLeaderboardEntry) -> Self {
        Self {
            player_name: value.player_name,
            score: value.score,
            total_questions: value.total_questions,
            time_in_seconds: value.time_in_seconds,
        }
    }
}

impl From<LeaderboardEntryEntity> for LeaderboardEntry {
    fn from(value: LeaderboardEntryEntity) -> Self {
        Self {
            id: value.id,
            player_name: value.player_name,
            score: value.score,
            total_questions: value.total_questions,
            time_in_seconds: value.time_in_seconds,
            submitted_at: value.date,
        }
    }
}
