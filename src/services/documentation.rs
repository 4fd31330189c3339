use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the UCL quiz backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::questions::get_questions,
        crate::routes::leaderboard::get_leaderboard,
        crate::routes::leaderboard::submit_score,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::question::QuestionResponse,
            crate::dto::leaderboard::SubmitScoreRequest,
            crate::dto::leaderboard::LeaderboardEntryResponse,
            crate::quiz::question::Difficulty,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "questions", description = "Trivia question pool"),
        (name = "leaderboard", description = "Ranked session results"),
    )
)]
pub struct ApiDoc;
