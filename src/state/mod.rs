use std::sync::Arc;

use crate::{config::AppConfig, dao::quiz_store::QuizStore};

/// Cloneable handle given to every handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the repository and the loaded configuration.
pub struct AppState {
    store: Arc<dyn QuizStore>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn QuizStore>, config: AppConfig) -> SharedState {
        Arc::new(Self { store, config })
    }

    /// Handle to the question and leaderboard repository.
    pub fn store(&self) -> Arc<dyn QuizStore> {
        self.store.clone()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
