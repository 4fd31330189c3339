//! Assembles the question set for a new session.

use tracing::{info, warn};

use crate::{
    client::QuizApi,
    quiz::{
        catalog::backup_questions,
        question::{Question, sort_by_difficulty},
    },
};

/// Where a session's questions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    /// Served by the backend.
    Remote,
    /// The fetch failed or returned nothing; the local backup set is used.
    Backup,
}

/// Questions ready for a session, ordered easy to hard.
#[derive(Debug, Clone)]
pub struct QuestionSupply {
    /// Ordered question set; never empty.
    pub questions: Vec<Question>,
    /// Provenance of `questions`.
    pub source: QuestionSource,
}

/// Fetch questions and order them by difficulty, falling back to the backup set.
pub async fn load_questions(api: &dyn QuizApi, count: Option<usize>) -> QuestionSupply {
    let (questions, source) = match api.fetch_questions(count).await {
        Ok(questions) if !questions.is_empty() => {
            info!(count = questions.len(), "fetched questions from backend");
            (questions, QuestionSource::Remote)
        }
        Ok(_) => {
            warn!("backend returned no questions; using backup set");
            (backup_questions(), QuestionSource::Backup)
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch questions; using backup set");
            (backup_questions(), QuestionSource::Backup)
        }
    };

    QuestionSupply {
        questions: sort_by_difficulty(questions),
        source,
    }
}
