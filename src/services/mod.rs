/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Leaderboard listing and score submission.
pub mod leaderboard_service;
/// Question listing, sampling and repository seeding.
pub mod question_service;
