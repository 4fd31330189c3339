//! Leaderboard listing and score submission.

use tracing::info;
use validator::Validate;

use crate::{
    dao::models::NewLeaderboardEntryEntity,
    dto::leaderboard::{LeaderboardEntryResponse, SubmitScoreRequest},
    error::ServiceError,
    quiz::leaderboard::{LeaderboardEntry, rank_entries},
    state::SharedState,
};

/// Return every stored entry, best score first and faster time on ties.
pub async fn list_leaderboard(
    state: &SharedState,
) -> Result<Vec<LeaderboardEntryResponse>, ServiceError> {
    let entries = state
        .store()
        .list_leaderboard_entries()
        .await?
        .into_iter()
        .map(LeaderboardEntry::from)
        .collect();

    Ok(rank_entries(entries)
        .into_iter()
        .map(LeaderboardEntryResponse::from)
        .collect())
}

/// Validate and persist a finished session.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<LeaderboardEntryResponse, ServiceError> {
    request
        .validate()
        .map_err(|err| ServiceError::InvalidInput(format!("validation failed: {err}")))?;

    let entry = NewLeaderboardEntryEntity::from(request.into_new_entry());
    let stored = state.store().insert_leaderboard_entry(entry).await?;
    info!(
        id = stored.id,
        player = %stored.player_name,
        score = stored.score,
        total = stored.total_questions,
        "leaderboard entry stored"
    );

    Ok(LeaderboardEntry::from(stored).into())
}
