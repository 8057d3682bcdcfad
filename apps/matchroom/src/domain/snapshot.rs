//! Read-only session view handed to the rendering layer.

use serde::Serialize;

use crate::domain::session::SessionPhase;
use crate::domain::{ChannelKey, SessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub user_id: UserId,
    /// Whether this participant's report has been accepted.
    pub reported: bool,
}

/// Everything a recruitment or result card needs, with no presentation state.
/// Teams, host and host game id stay empty until finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub channel: ChannelKey,
    pub status: SessionPhase,
    pub organizer: UserId,
    pub host: Option<UserId>,
    pub host_game_id: Option<String>,
    pub capacity: usize,
    pub roster: Vec<RosterEntry>,
    pub team_a: Vec<RosterEntry>,
    pub team_b: Vec<RosterEntry>,
    pub reports_received: usize,
}

impl SessionSnapshot {
    pub fn roster_ids(&self) -> Vec<UserId> {
        self.roster.iter().map(|e| e.user_id).collect()
    }
}
