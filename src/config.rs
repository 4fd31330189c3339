//! Application-level configuration loading, including the question pool seeded into storage.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::quiz::{
    catalog::default_questions,
    question::{Difficulty, Question, QuestionError},
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "UCL_QUIZ_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    questions: Vec<Question>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the built-in question pool.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        count = app_config.questions.len(),
                        "loaded question pool from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document. A missing or empty `questions` array keeps the built-in pool.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(contents)?;
        raw.try_into()
    }

    /// Questions to seed into an empty repository.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

/// Reasons a configuration document is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    /// One of the configured questions breaks the question rules.
    #[error("question #{position} is invalid: {source}")]
    InvalidQuestion {
        /// One-based position in the `questions` array.
        position: usize,
        /// Broken question rule.
        #[source]
        source: QuestionError,
    },
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

impl TryFrom<RawConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(value: RawConfig) -> Result<Self, Self::Error> {
        if value.questions.is_empty() {
            return Ok(Self::default());
        }

        let questions = value
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let position = index + 1;
                Question::new(
                    position as u64,
                    raw.question,
                    raw.options,
                    raw.correct_answer,
                    raw.difficulty,
                )
                .map_err(|source| ConfigError::InvalidQuestion { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of a single question inside the configuration file.
struct RawQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    difficulty: Difficulty,
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_builtin_pool() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.questions().len(), default_questions().len());
    }

    #[test]
    fn configured_questions_replace_the_pool() {
        let config = AppConfig::from_json(
            r#"{"questions":[{"question":"Who won in 1999?","options":["Bayern","United","Valencia","Juventus"],"correctAnswer":1,"difficulty":"hard"}]}"#,
        )
        .unwrap();

        assert_eq!(config.questions().len(), 1);
        let question = &config.questions()[0];
        assert_eq!(question.id(), 1);
        assert_eq!(question.correct_option(), "United");
        assert_eq!(question.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn invalid_question_rejects_document() {
        let err = AppConfig::from_json(
            r#"{"questions":[{"question":"Q","options":["a","b","c","d"],"correctAnswer":4,"difficulty":"easy"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidQuestion {
                position: 1,
                source: QuestionError::CorrectAnswerOutOfRange(4)
            }
        ));

        assert!(matches!(
            AppConfig::from_json("not json"),
            Err(ConfigError::Malformed(_))
        ));
    }
}
