//! Session lifecycle state machine.
//!
//! `Recruiting -> Reporting -> Completed`, with `Deleted` reachable only from
//! `Recruiting`. Transitions that need the participant store are split in two:
//! `begin_*` validates and marks the operation pending, `commit_*` applies the
//! result, and [`Session::abandon`] clears the mark when the store call fails.
//! Every `begin_*` and plain mutation validates fully before changing state.

use std::fmt;

use serde::Serialize;

use crate::config::MatchRules;
use crate::domain::reports::{validate_report, Report, ReportBook, ReportForm};
use crate::domain::roster::Roster;
use crate::domain::snapshot::{RosterEntry, SessionSnapshot};
use crate::domain::teams::TeamAllocation;
use crate::domain::{ChannelKey, SessionId, UserId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Open for join/leave until the roster fills.
    Recruiting,
    /// Teams drawn; participants submit outcome reports.
    Reporting,
    /// Summary published.
    Completed,
    /// Removed by the organizer before finalize.
    Deleted,
}

impl SessionPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Recruiting => "recruiting",
            SessionPhase::Reporting => "reporting",
            SessionPhase::Completed => "completed",
            SessionPhase::Deleted => "deleted",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Deleted)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store-backed operation that has been validated but not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Finalize,
    Report(UserId),
    Complete,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    channel: ChannelKey,
    phase: SessionPhase,
    roster: Roster,
    teams: Option<TeamAllocation>,
    host_game_id: Option<String>,
    reports: ReportBook,
    /// Session-wide pending transition (finalize or complete).
    busy: Option<PendingOp>,
    rules: MatchRules,
}

impl Session {
    pub fn new(id: SessionId, channel: ChannelKey, organizer: UserId, rules: MatchRules) -> Self {
        Self {
            id,
            channel,
            phase: SessionPhase::Recruiting,
            roster: Roster::new(organizer, rules.capacity),
            teams: None,
            host_game_id: None,
            reports: ReportBook::default(),
            busy: None,
            rules,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn channel(&self) -> ChannelKey {
        self.channel
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn organizer(&self) -> UserId {
        self.roster.organizer()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn teams(&self) -> Option<&TeamAllocation> {
        self.teams.as_ref()
    }

    pub fn host_game_id(&self) -> Option<&str> {
        self.host_game_id.as_deref()
    }

    pub fn reports(&self) -> &ReportBook {
        &self.reports
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    // ---- Guards

    fn require_phase(&self, expected: SessionPhase) -> Result<(), DomainError> {
        if self.phase.is_terminal() {
            return Err(DomainError::SessionClosed(self.phase));
        }
        if self.phase != expected {
            return Err(DomainError::WrongState {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn require_idle(&self) -> Result<(), DomainError> {
        match self.busy {
            Some(_) => Err(DomainError::OperationInFlight),
            None => Ok(()),
        }
    }

    fn require_organizer(&self, requester: UserId) -> Result<(), DomainError> {
        if requester != self.organizer() {
            return Err(DomainError::NotOrganizer(requester));
        }
        Ok(())
    }

    // ---- Recruiting

    pub fn join(&mut self, user: UserId) -> Result<(), DomainError> {
        self.require_phase(SessionPhase::Recruiting)?;
        self.require_idle()?;
        self.roster.join(user)
    }

    pub fn leave(&mut self, user: UserId) -> Result<(), DomainError> {
        self.require_phase(SessionPhase::Recruiting)?;
        self.require_idle()?;
        self.roster.leave(user)
    }

    pub fn delete(&mut self, requester: UserId) -> Result<(), DomainError> {
        self.require_phase(SessionPhase::Recruiting)?;
        self.require_idle()?;
        self.require_organizer(requester)?;
        self.phase = SessionPhase::Deleted;
        Ok(())
    }

    /// Validate finalize and freeze the roster. Returns the roster to allocate.
    pub fn begin_finalize(&mut self, requester: UserId) -> Result<Vec<UserId>, DomainError> {
        self.require_phase(SessionPhase::Recruiting)?;
        self.require_idle()?;
        self.require_organizer(requester)?;
        if self.roster.len() != self.rules.capacity {
            return Err(DomainError::NotFull {
                have: self.roster.len(),
                need: self.rules.capacity,
            });
        }
        self.busy = Some(PendingOp::Finalize);
        Ok(self.roster.members().to_vec())
    }

    pub fn commit_finalize(
        &mut self,
        allocation: TeamAllocation,
        host_game_id: String,
    ) -> Result<(), DomainError> {
        if self.busy != Some(PendingOp::Finalize) {
            return Err(DomainError::invariant("finalize committed without begin"));
        }
        self.busy = None;
        self.teams = Some(allocation);
        self.host_game_id = Some(host_game_id);
        self.phase = SessionPhase::Reporting;
        Ok(())
    }

    // ---- Reporting

    /// Validate a report and reserve the reporter's slot.
    pub fn begin_report(
        &mut self,
        reporter: UserId,
        form: &ReportForm,
    ) -> Result<Report, DomainError> {
        self.require_phase(SessionPhase::Reporting)?;
        if !self.roster.contains(reporter) {
            return Err(DomainError::NotParticipant(reporter));
        }
        if self.reports.has_reported(reporter) {
            return Err(DomainError::AlreadyReported(reporter));
        }
        if self.reports.is_pending(reporter) {
            return Err(DomainError::OperationInFlight);
        }
        self.require_idle()?;
        let report = validate_report(&self.rules, reporter, form)?;
        self.reports.begin(reporter);
        Ok(report)
    }

    pub fn commit_report(&mut self, reporter: UserId) -> Result<(), DomainError> {
        if !self.reports.accept(reporter) {
            return Err(DomainError::invariant(format!(
                "report by {reporter} committed without begin"
            )));
        }
        Ok(())
    }

    /// Validate completion and lock the session. Returns reporters in
    /// acceptance order.
    pub fn begin_complete(&mut self, requester: UserId) -> Result<Vec<UserId>, DomainError> {
        self.require_phase(SessionPhase::Reporting)?;
        self.require_idle()?;
        self.require_organizer(requester)?;
        if !self.reports.covers(self.roster.members()) {
            return Err(DomainError::IncompleteReports {
                reported: self.reports.len(),
                roster: self.roster.len(),
            });
        }
        self.busy = Some(PendingOp::Complete);
        Ok(self.reports.accepted().to_vec())
    }

    pub fn commit_complete(&mut self) -> Result<(), DomainError> {
        if self.busy != Some(PendingOp::Complete) {
            return Err(DomainError::invariant("complete committed without begin"));
        }
        self.busy = None;
        self.phase = SessionPhase::Completed;
        Ok(())
    }

    /// Drop a pending operation after its store call failed. The session is
    /// left exactly as it was before the matching `begin_*`.
    pub fn abandon(&mut self, op: PendingOp) {
        match op {
            PendingOp::Report(user) => self.reports.abandon(user),
            PendingOp::Finalize | PendingOp::Complete => {
                if self.busy == Some(op) {
                    self.busy = None;
                }
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let reported = |user: UserId| self.reports.has_reported(user);
        let entries = |users: &[UserId]| -> Vec<RosterEntry> {
            users
                .iter()
                .map(|&user_id| RosterEntry {
                    user_id,
                    reported: reported(user_id),
                })
                .collect()
        };

        SessionSnapshot {
            session_id: self.id.clone(),
            channel: self.channel,
            status: self.phase,
            organizer: self.organizer(),
            host: self.teams.as_ref().map(|t| t.host),
            host_game_id: self.host_game_id.clone(),
            capacity: self.rules.capacity,
            roster: entries(self.roster.members()),
            team_a: self
                .teams
                .as_ref()
                .map(|t| entries(&t.team_a))
                .unwrap_or_default(),
            team_b: self
                .teams
                .as_ref()
                .map(|t| entries(&t.team_b))
                .unwrap_or_default(),
            reports_received: self.reports.len(),
        }
    }
}
