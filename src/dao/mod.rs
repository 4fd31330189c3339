/// Database model definitions.
pub mod models;
/// Question and leaderboard repository.
pub mod quiz_store;
/// Storage error type shared by every backend.
pub mod storage;
