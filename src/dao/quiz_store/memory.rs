//! Process-local store backed by concurrent maps. Nothing survives a restart.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::SystemTime,
};

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{
    models::{LeaderboardEntryEntity, NewLeaderboardEntryEntity, NewQuestionEntity, QuestionEntity},
    quiz_store::QuizStore,
    storage::StorageResult,
};

#[derive(Debug)]
struct Tables {
    questions: DashMap<u64, QuestionEntity>,
    leaderboard: DashMap<u64, LeaderboardEntryEntity>,
    next_question_id: AtomicU64,
    next_entry_id: AtomicU64,
}

/// In-memory [`QuizStore`]; clones share the same tables.
#[derive(Debug, Clone)]
pub struct MemoryQuizStore {
    tables: Arc<Tables>,
}

impl Default for MemoryQuizStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryQuizStore {
    /// Empty store; identifiers start at 1.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Tables {
                questions: DashMap::new(),
                leaderboard: DashMap::new(),
                next_question_id: AtomicU64::new(1),
                next_entry_id: AtomicU64::new(1),
            }),
        }
    }
}

/// Snapshot the values of a table in identifier (insertion) order.
fn ordered_values<T: Clone>(table: &DashMap<u64, T>) -> Vec<T> {
    let mut rows: Vec<(u64, T)> = table
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    rows.sort_unstable_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, value)| value).collect()
}

impl QuizStore for MemoryQuizStore {
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let tables = self.tables.clone();
        Box::pin(async move { Ok(ordered_values(&tables.questions)) })
    }

    fn insert_question(
        &self,
        question: NewQuestionEntity,
    ) -> BoxFuture<'static, StorageResult<QuestionEntity>> {
        let tables = self.tables.clone();
        Box::pin(async move {
            let id = tables.next_question_id.fetch_add(1, Ordering::Relaxed);
            let entity = question.with_id(id);
            tables.questions.insert(id, entity.clone());
            Ok(entity)
        })
    }

    fn list_leaderboard_entries(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let tables = self.tables.clone();
        Box::pin(async move { Ok(ordered_values(&tables.leaderboard)) })
    }

    fn insert_leaderboard_entry(
        &self,
        entry: NewLeaderboardEntryEntity,
    ) -> BoxFuture<'static, StorageResult<LeaderboardEntryEntity>> {
        let tables = self.tables.clone();
        Box::pin(async move {
            let id = tables.next_entry_id.fetch_add(1, Ordering::Relaxed);
            let entity = entry.into_entity(id, SystemTime::now());
            tables.leaderboard.insert(id, entity.clone());
            Ok(entity)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
