pub mod memory;

use crate::dao::models::{
    LeaderboardEntryEntity, NewLeaderboardEntryEntity, NewQuestionEntity, QuestionEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for questions and leaderboard entries.
///
/// Identifiers (and leaderboard timestamps) are allocated by the store.
pub trait QuizStore: Send + Sync {
    /// Every stored question, in id order.
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Store a question under a freshly allocated id.
    fn insert_question(
        &self,
        question: NewQuestionEntity,
    ) -> BoxFuture<'static, StorageResult<QuestionEntity>>;
    /// Every stored leaderboard entry, unranked.
    fn list_leaderboard_entries(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>>;
    /// Store an entry, allocating its id and submission time.
    fn insert_leaderboard_entry(
        &self,
        entry: NewLeaderboardEntryEntity,
    ) -> BoxFuture<'static, StorageResult<LeaderboardEntryEntity>>;
    /// Cheap probe used by `/healthcheck`.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
