//! Wire representation of leaderboard entries and score submissions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{
        format_system_time, parse_system_time,
        validation::{validate_player_name_field, validate_score_bounds},
    },
    quiz::leaderboard::{EntryId, LeaderboardEntry, NewLeaderboardEntry},
};

/// Body of `POST /leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_score_bounds"))]
pub struct SubmitScoreRequest {
    /// Player name, 1 to 15 characters once trimmed.
    #[validate(custom(function = "validate_player_name_field"))]
    pub player_name: String,
    /// Correct answers, at most `totalQuestions`.
    pub score: u32,
    /// Questions played in the session.
    #[validate(range(min = 1))]
    pub total_questions: u32,
    /// Elapsed session time in whole seconds.
    pub time_in_seconds: u64,
}

impl SubmitScoreRequest {
    /// Convert a validated request, storing the trimmed name.
    pub fn into_new_entry(self) -> NewLeaderboardEntry {
        NewLeaderboardEntry {
            player_name: self.player_name.trim().to_owned(),
            score: self.score,
            total_questions: self.total_questions,
            time_in_seconds: self.time_in_seconds,
        }
    }
}

impl From<&NewLeaderboardEntry> for SubmitScoreRequest {
    fn from(value: &NewLeaderboardEntry) -> Self {
        Self {
            player_name: value.player_name.clone(),
            score: value.score,
            total_questions: value.total_questions,
            time_in_seconds: value.time_in_seconds,
        }
    }
}

/// Leaderboard entry as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    /// Store-allocated identifier.
    pub id: EntryId,
    /// Trimmed player name.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions played.
    pub total_questions: u32,
    /// Elapsed session time in whole seconds.
    pub time_in_seconds: u64,
    /// RFC 3339 timestamp of the submission.
    pub date: String,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(value: LeaderboardEntry) -> Self {
        Self {
            id: value.id,
            player_name: value.player_name,
            score: value.score,
            total_questions: value.total_questions,
            time_in_seconds: value.time_in_seconds,
            date: format_system_time(value.submitted_at),
        }
    }
}

impl LeaderboardEntryResponse {
    /// Convert back into the domain entry; `None` when the date is unreadable.
    pub fn into_entry(self) -> Option<LeaderboardEntry> {
        let submitted_at = parse_system_time(&self.date)?;
        Some(LeaderboardEntry {
            id: self.id,
            player_name: self.player_name,
            score: self.score,
            total_questions: self.total_questions,
            time_in_seconds: self.time_in_seconds,
            submitted_at,
        })
    }
}
