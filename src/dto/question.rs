//! Wire representation of questions served by `GET /questions`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::quiz::question::{Difficulty, Question, QuestionError, QuestionId};

/// Largest sample a client may request through `?count=`.
pub const MAX_SAMPLE_SIZE: usize = 50;

/// Question as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Store-allocated identifier.
    pub id: QuestionId,
    /// Prompt shown to the player.
    pub question: String,
    /// The four answer options.
    pub options: Vec<String>,
    /// Index (0-3) of the correct option.
    pub correct_answer: usize,
    /// Used to order a session from easy to hard.
    pub difficulty: Difficulty,
}

impl From<Question> for QuestionResponse {
    fn from(value: Question) -> Self {
        Self {
            id: value.id(),
            question: value.prompt().to_owned(),
            options: value.options().to_vec(),
            correct_answer: value.correct_answer(),
            difficulty: value.difficulty(),
        }
    }
}

impl TryFrom<QuestionResponse> for Question {
    type Error = QuestionError;

    fn try_from(value: QuestionResponse) -> Result<Self, Self::Error> {
        Question::new(
            value.id,
            value.question,
            value.options,
            value.correct_answer,
            value.difficulty,
        )
    }
}

/// Query string accepted by `GET /questions`.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionQuery {
    /// Return a random sample of this many questions instead of the whole pool.
    #[validate(range(min = 1, max = 50))]
    pub count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let question = Question::new(
            7,
            "Who won in 2005?",
            vec!["Liverpool".into(), "Milan".into(), "Chelsea".into(), "Porto".into()],
            0,
            Difficulty::Medium,
        )
        .unwrap();

        let json = serde_json::to_value(QuestionResponse::from(question)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["correctAnswer"], 0);
        assert_eq!(json["difficulty"], "medium");
        assert_eq!(json["options"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn malformed_payload_is_not_a_question() {
        let response = QuestionResponse {
            id: 1,
            question: "Q".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer: 0,
            difficulty: Difficulty::Easy,
        };
        assert_eq!(
            Question::try_from(response),
            Err(QuestionError::OptionCount(2))
        );
    }

    #[test]
    fn sample_size_is_bounded() {
        assert!(QuestionQuery { count: None }.validate().is_ok());
        assert!(QuestionQuery { count: Some(1) }.validate().is_ok());
        assert!(QuestionQuery { count: Some(MAX_SAMPLE_SIZE) }.validate().is_ok());
        assert!(QuestionQuery { count: Some(0) }.validate().is_err());
        assert!(QuestionQuery { count: Some(51) }.validate().is_err());
    }
}
