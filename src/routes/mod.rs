use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// `/healthcheck`.
pub mod health;
/// `GET|POST /leaderboard`.
pub mod leaderboard;
/// `GET /questions`.
pub mod questions;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(questions::router())
        .merge(leaderboard::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use futures::future::BoxFuture;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        config::AppConfig,
        dao::{
            models::{
                LeaderboardEntryEntity, NewLeaderboardEntryEntity, NewQuestionEntity,
                QuestionEntity,
            },
            quiz_store::{QuizStore, memory::MemoryQuizStore},
            storage::{StorageError, StorageResult},
        },
        services::question_service,
        state::{AppState, SharedState},
    };

    /// State over an in-memory store seeded with the built-in pool.
    pub async fn seeded_state() -> SharedState {
        let state = AppState::new(Arc::new(MemoryQuizStore::new()), AppConfig::default());
        question_service::seed_questions(&state).await.unwrap();
        state
    }

    /// State whose store fails every call.
    pub fn broken_state() -> SharedState {
        AppState::new(Arc::new(BrokenStore), AppConfig::default())
    }

    /// Send `request` through the full router and decode the JSON body.
    pub async fn call(state: SharedState, request: Request<Body>) -> (StatusCode, Value) {
        let response = super::router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    struct BrokenStore;

    fn offline<T: Send + 'static>() -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(async {
            Err(StorageError::unavailable(
                "backend offline".into(),
                std::io::Error::other("connection refused"),
            ))
        })
    }

    impl QuizStore for BrokenStore {
        fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
            offline()
        }

        fn insert_question(
            &self,
            _question: NewQuestionEntity,
        ) -> BoxFuture<'static, StorageResult<QuestionEntity>> {
            offline()
        }

        fn list_leaderboard_entries(
            &self,
        ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
            offline()
        }

        fn insert_leaderboard_entry(
            &self,
            _entry: NewLeaderboardEntryEntity,
        ) -> BoxFuture<'static, StorageResult<LeaderboardEntryEntity>> {
            offline()
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            offline()
        }
    }
}
