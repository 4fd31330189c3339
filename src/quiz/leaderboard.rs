//! Leaderboard entries, their ranking and the player name rules shared by the
//! client-side submission flow and the backend validation.

use std::{cmp::Ordering, time::SystemTime};

use thiserror::Error;

/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 15;

/// Identifier allocated to a leaderboard entry by the repository.
pub type EntryId = u64;

/// Result of one completed and named session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Repository identifier.
    pub id: EntryId,
    /// Trimmed player name.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// Wall-clock duration of the session.
    pub time_in_seconds: u64,
    /// When the entry was stored.
    pub submitted_at: SystemTime,
}

/// Session result waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardEntry {
    /// Trimmed player name.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the session.
    pub total_questions: u32,
    /// Wall-clock duration of the session.
    pub time_in_seconds: u64,
}

/// Field-level rejection of a player name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Blank after trimming.
    #[error("Please enter your name")]
    Empty,
    /// Longer than [`MAX_PLAYER_NAME_CHARS`].
    #[error("Name must be 15 characters or less")]
    TooLong {
        /// Length of the rejected (trimmed) name.
        chars: usize,
    },
}

impl NameError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        "playerName"
    }
}

/// Check a raw name and return its trimmed form.
pub fn validate_player_name(raw: &str) -> Result<&str, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let chars = name.chars().count();
    if chars > MAX_PLAYER_NAME_CHARS {
        return Err(NameError::TooLong { chars });
    }

    Ok(name)
}

/// Leaderboard order: higher score first, then faster time.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.time_in_seconds.cmp(&b.time_in_seconds))
}

/// Sort entries into leaderboard order. Stable, so equal entries keep insertion order.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(compare_entries);
    entries
}
