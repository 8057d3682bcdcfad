//! Process-wide map from channel key to the one live session in it.
//!
//! The map and each session are separate exclusion domains: create/retire
//! arbitrate on the map's per-key entry lock, while session mutations only
//! take that session's own mutex. Sessions in different channels never
//! contend.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};

use crate::config::MatchRules;
use crate::domain::{ChannelKey, Session, SessionId, UserId};
use crate::errors::domain::DomainError;

/// A live session plus the lock that serializes its mutations.
///
/// The lock is synchronous and must never be held across an `.await`.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    channel: ChannelKey,
    state: Mutex<Session>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            id: session.id().clone(),
            channel: session.channel(),
            state: Mutex::new(session),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn channel(&self) -> ChannelKey {
        self.channel
    }

    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.state.lock()
    }
}

pub type SessionRef = Arc<SessionHandle>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<ChannelKey, SessionRef>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create and register a recruiting session, unless the channel already
    /// has one. Check and insert happen under the same entry lock.
    pub fn start_session(
        &self,
        channel: ChannelKey,
        organizer: UserId,
        id: SessionId,
        rules: MatchRules,
    ) -> Result<SessionRef, DomainError> {
        match self.sessions.entry(channel) {
            Entry::Occupied(_) => Err(DomainError::AlreadyActive(channel)),
            Entry::Vacant(slot) => {
                let handle = Arc::new(SessionHandle::new(Session::new(
                    id, channel, organizer, rules,
                )));
                slot.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    pub fn lookup(&self, channel: ChannelKey) -> Option<SessionRef> {
        self.sessions.get(&channel).map(|entry| entry.value().clone())
    }

    /// Remove whatever session the channel maps to. Idempotent.
    pub fn retire(&self, channel: ChannelKey) {
        self.sessions.remove(&channel);
    }

    /// Remove the mapping only if it still points at `id`.
    pub fn retire_session(&self, channel: ChannelKey, id: &SessionId) -> bool {
        self.sessions
            .remove_if(&channel, |_, handle| handle.id() == id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
