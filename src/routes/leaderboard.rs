use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::leaderboard::{LeaderboardEntryResponse, SubmitScoreRequest},
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Leaderboard endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/leaderboard", get(get_leaderboard).post(submit_score))
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Entries ranked by score, then time", body = [LeaderboardEntryResponse]),
        (status = 500, description = "Storage failure")
    )
)]
/// Return the ranked leaderboard.
pub async fn get_leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaderboardEntryResponse>>, AppError> {
    let payload = leaderboard_service::list_leaderboard(&state).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    post,
    path = "/leaderboard",
    tag = "leaderboard",
    request_body = SubmitScoreRequest,
    responses(
        (status = 201, description = "Entry stored", body = LeaderboardEntryResponse),
        (status = 400, description = "Malformed or invalid submission"),
        (status = 500, description = "Storage failure")
    )
)]
/// Store the result of a finished session.
pub async fn submit_score(
    State(state): State<SharedState>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LeaderboardEntryResponse>), AppError> {
    let Json(request) = payload?;
    let entry = leaderboard_service::submit_score(&state, request).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
