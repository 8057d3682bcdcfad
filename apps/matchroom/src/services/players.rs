use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::UserId;
use crate::errors::domain::DomainError;
use crate::repos::participants::ParticipantStore;

/// Game identifier registration, independent of any session.
#[derive(Clone)]
pub struct PlayerService {
    store: Arc<dyn ParticipantStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    /// Register or replace the caller's in-game identifier.
    pub async fn register_game_id(&self, user: UserId, raw: &str) -> Result<String, DomainError> {
        let game_id = raw.trim();
        if game_id.is_empty() {
            return Err(DomainError::InvalidGameId);
        }
        self.store.set_game_id(user, game_id).await.map_err(|err| {
            warn!(user_id = user, error = %err, "Game id registration failed");
            DomainError::from(err)
        })?;
        info!(user_id = user, "Game id registered");
        Ok(game_id.to_string())
    }

    pub async fn game_id(&self, user: UserId) -> Result<String, DomainError> {
        self.store
            .get_game_id(user)
            .await?
            .ok_or(DomainError::GameIdNotFound(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryParticipantStore;

    #[tokio::test]
    async fn test_register_trims_and_replaces() {
        let players = PlayerService::new(Arc::new(InMemoryParticipantStore::new()));
        assert_eq!(
            players.game_id(4).await,
            Err(DomainError::GameIdNotFound(4))
        );

        assert_eq!(players.register_game_id(4, "  ABC-1 ").await.unwrap(), "ABC-1");
        players.register_game_id(4, "XYZ-2").await.unwrap();
        assert_eq!(players.game_id(4).await.unwrap(), "XYZ-2");
    }

    #[tokio::test]
    async fn test_blank_game_id_rejected() {
        let players = PlayerService::new(Arc::new(InMemoryParticipantStore::new()));
        assert_eq!(
            players.register_game_id(4, "   ").await,
            Err(DomainError::InvalidGameId)
        );
    }
}
