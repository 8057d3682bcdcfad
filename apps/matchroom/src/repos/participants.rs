//! Participant store contract: per-user game identifiers and the append-only
//! result log.
//!
//! The store is remote and fallible. The session core only relies on
//! "append is durable before the call returns" and on `get_result_rows`
//! returning rows in append order.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ResultRow, SessionId, UserId};
use crate::errors::domain::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("participant store unavailable: {0}")]
    Unavailable(String),
    #[error("participant store returned malformed data: {0}")]
    Malformed(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::collaborator(err.to_string())
    }
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Registered game identifier for `user`, if any.
    async fn get_game_id(&self, user: UserId) -> Result<Option<String>, StoreError>;

    /// Insert or replace the game identifier for `user`.
    async fn set_game_id(&self, user: UserId, game_id: &str) -> Result<(), StoreError>;

    /// Append one row to the result log.
    async fn append_result_row(&self, row: ResultRow) -> Result<(), StoreError>;

    /// Every row for `session_id`, in append order.
    async fn get_result_rows(&self, session_id: &SessionId) -> Result<Vec<ResultRow>, StoreError>;
}
