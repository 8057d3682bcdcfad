//! Process-local participant store.
//!
//! Backs the binary when no external store is wired in, and serves as the
//! default store in tests. Contents are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{ResultRow, SessionId, UserId};
use crate::repos::participants::{ParticipantStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    game_ids: RwLock<HashMap<UserId, String>>,
    results: RwLock<Vec<ResultRow>>,
}

impl InMemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed game identifiers, e.g. from a fixture.
    pub fn with_game_ids<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (UserId, String)>,
    {
        self.game_ids.write().extend(entries);
        self
    }

    /// Total rows in the result log across all sessions.
    pub fn result_row_count(&self) -> usize {
        self.results.read().len()
    }
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn get_game_id(&self, user: UserId) -> Result<Option<String>, StoreError> {
        Ok(self.game_ids.read().get(&user).cloned())
    }

    async fn set_game_id(&self, user: UserId, game_id: &str) -> Result<(), StoreError> {
        let previous = self.game_ids.write().insert(user, game_id.to_string());
        debug!(user_id = user, updated = previous.is_some(), "Stored game id");
        Ok(())
    }

    async fn append_result_row(&self, row: ResultRow) -> Result<(), StoreError> {
        self.results.write().push(row);
        Ok(())
    }

    async fn get_result_rows(&self, session_id: &SessionId) -> Result<Vec<ResultRow>, StoreError> {
        Ok(self
            .results
            .read()
            .iter()
            .filter(|row| &row.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outcome;

    fn row(session: &str, user_id: UserId, rank: u8) -> ResultRow {
        ResultRow {
            session_id: SessionId::from(session),
            user_id,
            outcome: Outcome::Win,
            score: 12.0,
            rank,
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_game_id_upsert() {
        let store = InMemoryParticipantStore::new();
        assert_eq!(store.get_game_id(1).await.unwrap(), None);
        store.set_game_id(1, "first").await.unwrap();
        store.set_game_id(1, "second").await.unwrap();
        assert_eq!(store.get_game_id(1).await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_result_rows_filtered_in_append_order() {
        let store = InMemoryParticipantStore::new();
        store.append_result_row(row("game-a", 1, 4)).await.unwrap();
        store.append_result_row(row("game-b", 2, 1)).await.unwrap();
        store.append_result_row(row("game-a", 3, 2)).await.unwrap();

        let rows = store.get_result_rows(&SessionId::from("game-a")).await.unwrap();
        let users: Vec<UserId> = rows.iter().map(|r| r.user_id).collect();
        assert_eq!(users, vec![1, 3]);
        assert_eq!(store.result_row_count(), 3);
    }
}
