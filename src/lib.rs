//! Library crate for the UCL quiz: the session engine, the HTTP backend and the
//! interactive host, exposed for the binaries and tests.

/// HTTP client for the backend and the question supply with backup fallback.
pub mod client;
/// Runtime configuration loading.
pub mod config;
/// Persistence layer: entities, errors and the store trait.
pub mod dao;
/// Wire types and validation.
pub mod dto;
/// HTTP error mapping.
pub mod error;
/// Screens and the event loop driving a session.
pub mod host;
/// Session engine, countdown, catalog and leaderboard rules.
pub mod quiz;
/// Axum routers.
pub mod routes;
/// Business logic shared by the handlers.
pub mod services;
/// Shared application state.
pub mod state;
