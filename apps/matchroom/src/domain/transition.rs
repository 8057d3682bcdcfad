use serde::Serialize;

use crate::domain::session::SessionPhase;
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::summary::ResultSummary;
use crate::domain::UserId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionTransition {
    /// Explicit: recruitment opened in a channel
    Started { organizer: UserId },

    /// Edge-triggered: user appeared on the roster
    PlayerJoined { user_id: UserId },

    /// Edge-triggered: user disappeared from the roster
    PlayerLeft { user_id: UserId },

    /// Edge-triggered: Recruiting -> Reporting
    Finalized {
        host: UserId,
        team_a: Vec<UserId>,
        team_b: Vec<UserId>,
    },

    /// Edge-triggered: a participant's report was accepted
    ReportRecorded { user_id: UserId },

    /// Explicit: results published; carries the summary
    Completed { summary: ResultSummary },

    /// Edge-triggered: Recruiting -> Deleted
    Deleted,
}

/// Derive transitions from before/after snapshots of the same session.
///
/// `Started` and `Completed` carry data the snapshots do not, so callers
/// publish those explicitly.
pub fn derive_transitions(
    before: &SessionSnapshot,
    after: &SessionSnapshot,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Roster changes
    let before_ids = before.roster_ids();
    let after_ids = after.roster_ids();
    for user_id in after_ids.iter().filter(|u| !before_ids.contains(u)) {
        transitions.push(SessionTransition::PlayerJoined { user_id: *user_id });
    }
    for user_id in before_ids.iter().filter(|u| !after_ids.contains(u)) {
        transitions.push(SessionTransition::PlayerLeft { user_id: *user_id });
    }

    // 2. Finalize (Recruiting -> Reporting)
    if before.status == SessionPhase::Recruiting && after.status == SessionPhase::Reporting {
        if let Some(host) = after.host {
            transitions.push(SessionTransition::Finalized {
                host,
                team_a: after.team_a.iter().map(|e| e.user_id).collect(),
                team_b: after.team_b.iter().map(|e| e.user_id).collect(),
            });
        }
    }

    // 3. Newly accepted reports
    for entry in after.roster.iter().filter(|e| e.reported) {
        let was_reported = before
            .roster
            .iter()
            .any(|b| b.user_id == entry.user_id && b.reported);
        if !was_reported {
            transitions.push(SessionTransition::ReportRecorded {
                user_id: entry.user_id,
            });
        }
    }

    // 4. Deletion
    if before.status != SessionPhase::Deleted && after.status == SessionPhase::Deleted {
        transitions.push(SessionTransition::Deleted);
    }

    transitions
}
