use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use validator::Validate;

use crate::{
    dto::question::{QuestionQuery, QuestionResponse},
    error::AppError,
    services::question_service,
    state::SharedState,
};

/// Question pool endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/questions", get(get_questions))
}

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(QuestionQuery),
    responses(
        (status = 200, description = "Question pool or a random sample of it", body = [QuestionResponse]),
        (status = 400, description = "Invalid sample size"),
        (status = 500, description = "Storage failure")
    )
)]
/// Return every question, or `count` randomly sampled ones.
pub async fn get_questions(
    State(state): State<SharedState>,
    query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<Json<Vec<QuestionResponse>>, AppError> {
    let Query(query) = query?;
    query.validate()?;
    let payload = question_service::list_questions(&state, query.count).await?;
    Ok(Json(payload))
}
