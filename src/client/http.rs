//! [`QuizApi`] over HTTP with `reqwest`.

use std::{env, sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    client::{ClientError, ClientResult, QuizApi},
    dto::{
        leaderboard::{LeaderboardEntryResponse, SubmitScoreRequest},
        question::QuestionResponse,
    },
    quiz::{
        leaderboard::{LeaderboardEntry, NewLeaderboardEntry},
        question::Question,
        submission::Ack,
    },
};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "UCL_QUIZ_API_URL";
/// Base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Upper bound on a single backend request, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const QUESTIONS: &str = "questions";
const LEADERBOARD: &str = "leaderboard";

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the quiz backend.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    base_url: Arc<str>,
}

impl HttpQuizApi {
    /// Client targeting `base_url` (trailing slashes ignored).
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ClientError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Client targeting [`API_URL_ENV`], or [`DEFAULT_API_URL`].
    pub fn from_env() -> ClientResult<Self> {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_questions_inner(&self, count: Option<usize>) -> ClientResult<Vec<Question>> {
        let mut request = self.client.get(self.url(QUESTIONS));
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::RequestSend {
                path: QUESTIONS,
                source,
            })?;
        let payload: Vec<QuestionResponse> = decode(QUESTIONS, response).await?;

        payload
            .into_iter()
            .map(|question| {
                Question::try_from(question).map_err(|err| ClientError::InvalidPayload {
                    path: QUESTIONS,
                    message: err.to_string(),
                })
            })
            .collect()
    }

    async fn submit_result_inner(&self, entry: NewLeaderboardEntry) -> ClientResult<Ack> {
        let response = self
            .client
            .post(self.url(LEADERBOARD))
            .json(&SubmitScoreRequest::from(&entry))
            .send()
            .await
            .map_err(|source| ClientError::RequestSend {
                path: LEADERBOARD,
                source,
            })?;
        let created: LeaderboardEntryResponse = decode(LEADERBOARD, response).await?;
        debug!(entry_id = created.id, "leaderboard accepted submission");

        Ok(Ack {
            entry_id: created.id,
        })
    }

    async fn list_leaderboard_inner(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        let response = self
            .client
            .get(self.url(LEADERBOARD))
            .send()
            .await
            .map_err(|source| ClientError::RequestSend {
                path: LEADERBOARD,
                source,
            })?;
        let payload: Vec<LeaderboardEntryResponse> = decode(LEADERBOARD, response).await?;

        payload
            .into_iter()
            .map(|entry| {
                let date = entry.date.clone();
                entry.into_entry().ok_or_else(|| ClientError::InvalidPayload {
                    path: LEADERBOARD,
                    message: format!("unreadable date `{date}`"),
                })
            })
            .collect()
    }
}

/// Check the status and decode the JSON body, surfacing the backend's `{message}` on failure.
async fn decode<T: DeserializeOwned>(path: &'static str, response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("server responded with status {status}"),
        };
        return Err(ClientError::RequestStatus {
            path,
            status,
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| ClientError::DecodeResponse { path, source })
}

impl QuizApi for HttpQuizApi {
    fn fetch_questions(&self, count: Option<usize>) -> BoxFuture<'static, ClientResult<Vec<Question>>> {
        let api = self.clone();
        Box::pin(async move { api.fetch_questions_inner(count).await })
    }

    fn submit_result(&self, entry: NewLeaderboardEntry) -> BoxFuture<'static, ClientResult<Ack>> {
        let api = self.clone();
        Box::pin(async move { api.submit_result_inner(entry).await })
    }

    fn list_leaderboard(&self) -> BoxFuture<'static, ClientResult<Vec<LeaderboardEntry>>> {
        let api = self.clone();
        Box::pin(async move { api.list_leaderboard_inner().await })
    }
}
