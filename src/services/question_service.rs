//! Question listing and the one-off seeding of an empty repository.

use tracing::{debug, info};

use crate::{
    dao::models::NewQuestionEntity,
    dto::question::QuestionResponse,
    error::ServiceError,
    quiz::question::{Question, sample_random},
    state::SharedState,
};

/// Return every stored question in id order, or a random sample of `count` of them.
///
/// A sample larger than the pool returns the whole pool in random order.
pub async fn list_questions(
    state: &SharedState,
    count: Option<usize>,
) -> Result<Vec<QuestionResponse>, ServiceError> {
    let entities = state.store().list_questions().await?;
    let questions = entities
        .into_iter()
        .map(|entity| {
            let id = entity.id;
            Question::try_from(entity)
                .map_err(|source| ServiceError::CorruptQuestion { id, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let questions = match count {
        Some(count) => {
            debug!(count, pool = questions.len(), "sampling questions");
            sample_random(&questions, count, &mut rand::rng())
        }
        None => questions,
    };

    Ok(questions.into_iter().map(QuestionResponse::from).collect())
}

/// Insert the configured pool when the repository holds no question yet.
///
/// Returns the number of inserted questions.
pub async fn seed_questions(state: &SharedState) -> Result<usize, ServiceError> {
    let store = state.store();
    if !store.list_questions().await?.is_empty() {
        debug!("question repository already populated; skipping seed");
        return Ok(0);
    }

    let pool = state.config().questions().to_vec();
    let count = pool.len();
    for question in pool {
        store
            .insert_question(NewQuestionEntity::from(question))
            .await?;
    }

    info!(count, "seeded question repository");
    Ok(count)
}
