use std::sync::Arc;

use crate::adapters::InMemoryParticipantStore;
use crate::config::ServerConfig;
use crate::repos::participants::ParticipantStore;
use crate::services::{PlayerService, SessionFlowService};

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionFlowService>,
    pub players: PlayerService,
}

impl AppState {
    pub fn new(sessions: SessionFlowService, players: PlayerService) -> Self {
        Self {
            sessions: Arc::new(sessions),
            players,
        }
    }

    /// Wire services around `store` according to `config`.
    pub fn from_config(config: &ServerConfig, store: Arc<dyn ParticipantStore>) -> Self {
        let mut sessions = SessionFlowService::new(store.clone())
            .with_allowed_channels(config.allowed_channels.iter().copied());
        if let Some(seed) = config.rng_seed {
            sessions = sessions.with_seed(seed);
        }
        Self::new(sessions, PlayerService::new(store))
    }

    /// In-memory store, default rules, every channel allowed.
    pub fn in_memory() -> Self {
        let store: Arc<dyn ParticipantStore> = Arc::new(InMemoryParticipantStore::new());
        Self::new(
            SessionFlowService::new(store.clone()),
            PlayerService::new(store),
        )
    }
}
