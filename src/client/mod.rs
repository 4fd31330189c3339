//! Client side of the quiz: the backend API seam and the question supply used
//! by the interactive host.

pub mod error;
pub mod http;
pub mod supply;

use futures::future::BoxFuture;

use crate::quiz::{
    leaderboard::{LeaderboardEntry, NewLeaderboardEntry},
    question::Question,
    submission::Ack,
};

pub use self::error::{ClientError, ClientResult};

/// Operations the host needs from the quiz backend.
pub trait QuizApi: Send + Sync {
    /// Fetch the question pool, or a random sample of `count` questions.
    fn fetch_questions(&self, count: Option<usize>) -> BoxFuture<'static, ClientResult<Vec<Question>>>;
    /// Persist a finished session.
    fn submit_result(&self, entry: NewLeaderboardEntry) -> BoxFuture<'static, ClientResult<Ack>>;
    /// Fetch the ranked leaderboard.
    fn list_leaderboard(&self) -> BoxFuture<'static, ClientResult<Vec<LeaderboardEntry>>>;
}
