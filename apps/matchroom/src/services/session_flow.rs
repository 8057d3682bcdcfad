//! Session flow service - routes inbound events to the session in a channel.
//!
//! Every operation looks the session up in the registry, validates and
//! mutates it under its own lock, and publishes the resulting transitions.
//! Participant store calls happen between a `begin_*` and a `commit_*`, with
//! the session lock released; a [`PendingGuard`] rolls the reservation back if
//! the call fails or the caller stops waiting.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::MatchRules;
use crate::domain::{
    allocate, build_summary, derive_transitions, ChannelKey, PendingOp, ReportForm,
    ResultRow, ResultSummary, Session, SessionId, SessionSnapshot, SessionTransition, UserId,
};
use crate::errors::domain::DomainError;
use crate::events::SessionEventHub;
use crate::repos::participants::ParticipantStore;
use crate::services::registry::{SessionHandle, SessionRef, SessionRegistry};

pub struct SessionFlowService {
    registry: Arc<SessionRegistry>,
    store: Arc<dyn ParticipantStore>,
    events: SessionEventHub,
    rules: MatchRules,
    allowed_channels: HashSet<ChannelKey>,
    rng: Mutex<ChaCha20Rng>,
}

impl SessionFlowService {
    /// Service with default rules, a fresh registry, no channel restriction,
    /// and an entropy-seeded random source.
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            store,
            events: SessionEventHub::new(),
            rules: MatchRules::default(),
            allowed_channels: HashSet::new(),
            rng: Mutex::new(ChaCha20Rng::from_os_rng()),
        }
    }

    /// Make session ids and team allocations reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(ChaCha20Rng::seed_from_u64(seed));
        self
    }

    pub fn with_rules(mut self, rules: MatchRules) -> Self {
        self.rules = rules;
        self
    }

    /// Restrict recruitment to these channels. An empty set allows all.
    pub fn with_allowed_channels(mut self, channels: impl IntoIterator<Item = ChannelKey>) -> Self {
        self.allowed_channels = channels.into_iter().collect();
        self
    }

    pub fn with_events(mut self, events: SessionEventHub) -> Self {
        self.events = events;
        self
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn events(&self) -> &SessionEventHub {
        &self.events
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    fn require_session(&self, channel: ChannelKey) -> Result<SessionRef, DomainError> {
        self.registry
            .lookup(channel)
            .ok_or(DomainError::SessionNotFound(channel))
    }

    fn next_seed(&self) -> u64 {
        self.rng.lock().next_u64()
    }

    /// Apply a synchronous mutation under the session lock and publish the
    /// transitions it produced.
    fn mutate<F>(
        &self,
        handle: &SessionHandle,
        op: &'static str,
        user_id: UserId,
        apply: F,
    ) -> Result<SessionSnapshot, DomainError>
    where
        F: FnOnce(&mut Session) -> Result<(), DomainError>,
    {
        let (before, after) = {
            let mut session = handle.lock();
            let before = session.snapshot();
            apply(&mut *session).inspect_err(|err| rejected(op, handle, user_id, err))?;
            (before, session.snapshot())
        };
        self.events
            .publish_all(&after, derive_transitions(&before, &after));
        Ok(after)
    }

    /// Open recruitment in `channel` with `organizer` as the only member.
    pub fn start_session(
        &self,
        channel: ChannelKey,
        organizer: UserId,
    ) -> Result<SessionSnapshot, DomainError> {
        if !self.allowed_channels.is_empty() && !self.allowed_channels.contains(&channel) {
            debug!(channel, user_id = organizer, "Recruitment refused in channel");
            return Err(DomainError::ChannelNotAllowed(channel));
        }

        let suffix = self.rng.lock().next_u32();
        let id = SessionId::generate(OffsetDateTime::now_utc(), suffix);
        let handle = self
            .registry
            .start_session(channel, organizer, id, self.rules.clone())
            .inspect_err(|_| debug!(channel, user_id = organizer, "Channel already recruiting"))?;

        let snapshot = handle.lock().snapshot();
        info!(
            channel,
            session_id = %snapshot.session_id,
            organizer,
            "Recruitment started"
        );
        self.events
            .publish_all(&snapshot, [SessionTransition::Started { organizer }]);
        Ok(snapshot)
    }

    pub fn snapshot(&self, channel: ChannelKey) -> Result<SessionSnapshot, DomainError> {
        Ok(self.require_session(channel)?.lock().snapshot())
    }

    pub fn join(&self, channel: ChannelKey, user: UserId) -> Result<SessionSnapshot, DomainError> {
        let handle = self.require_session(channel)?;
        let snapshot = self.mutate(&handle, "join", user, |s| s.join(user))?;
        debug!(channel, user_id = user, players = snapshot.roster.len(), "Player joined");
        Ok(snapshot)
    }

    pub fn leave(&self, channel: ChannelKey, user: UserId) -> Result<SessionSnapshot, DomainError> {
        let handle = self.require_session(channel)?;
        let snapshot = self.mutate(&handle, "leave", user, |s| s.leave(user))?;
        debug!(channel, user_id = user, players = snapshot.roster.len(), "Player left");
        Ok(snapshot)
    }

    /// Delete a recruiting session and free its channel.
    pub fn delete(&self, channel: ChannelKey, requester: UserId) -> Result<(), DomainError> {
        let handle = self.require_session(channel)?;
        self.mutate(&handle, "delete", requester, |s| s.delete(requester))?;
        self.registry.retire_session(channel, handle.id());
        info!(channel, session_id = %handle.id(), "Recruitment deleted");
        Ok(())
    }

    /// Split the full roster into teams, draw a host, and resolve the host's
    /// game id. Any failure leaves the session recruiting and unchanged.
    pub async fn finalize(
        &self,
        channel: ChannelKey,
        requester: UserId,
    ) -> Result<SessionSnapshot, DomainError> {
        let handle = self.require_session(channel)?;
        let (before, roster) = {
            let mut session = handle.lock();
            let before = session.snapshot();
            let roster = session
                .begin_finalize(requester)
                .inspect_err(|err| rejected("finalize", &handle, requester, err))?;
            (before, roster)
        };
        let guard = PendingGuard::new(&handle, PendingOp::Finalize);

        let allocation = allocate(&roster, self.next_seed())?;
        let host = allocation.host;
        let host_game_id = match self.store.get_game_id(host).await {
            Ok(Some(game_id)) => game_id,
            Ok(None) => {
                warn!(channel, host, "Host has no registered game id");
                return Err(DomainError::GameIdNotFound(host));
            }
            Err(err) => {
                warn!(channel, host, error = %err, "Host game id lookup failed");
                return Err(err.into());
            }
        };

        let seed = allocation.seed;
        let after = guard.commit(|session| {
            session.commit_finalize(allocation, host_game_id)?;
            Ok(session.snapshot())
        })?;

        info!(
            channel,
            session_id = %after.session_id,
            host,
            seed,
            "Recruitment finalized"
        );
        self.events
            .publish_all(&after, derive_transitions(&before, &after));
        Ok(after)
    }

    /// Validate and record one participant's report.
    pub async fn submit_report(
        &self,
        channel: ChannelKey,
        reporter: UserId,
        form: ReportForm,
    ) -> Result<SessionSnapshot, DomainError> {
        let handle = self.require_session(channel)?;
        let report = handle
            .lock()
            .begin_report(reporter, &form)
            .inspect_err(|err| rejected("report", &handle, reporter, err))?;
        let guard = PendingGuard::new(&handle, PendingOp::Report(reporter));

        let row = ResultRow::from_report(handle.id(), &report);
        if let Err(err) = self.store.append_result_row(row).await {
            warn!(channel, user_id = reporter, error = %err, "Result append failed");
            return Err(err.into());
        }

        let after = guard.commit(|session| {
            session.commit_report(reporter)?;
            Ok(session.snapshot())
        })?;

        info!(
            channel,
            session_id = %after.session_id,
            user_id = reporter,
            rank = report.rank,
            reported = after.reports_received,
            "Report recorded"
        );
        self.events.publish_all(
            &after,
            [SessionTransition::ReportRecorded { user_id: reporter }],
        );
        Ok(after)
    }

    /// Close reporting, build the ranked summary, and retire the session.
    pub async fn complete(
        &self,
        channel: ChannelKey,
        requester: UserId,
    ) -> Result<ResultSummary, DomainError> {
        let handle = self.require_session(channel)?;
        let (reported, organizer) = {
            let mut session = handle.lock();
            let reported = session
                .begin_complete(requester)
                .inspect_err(|err| rejected("complete", &handle, requester, err))?;
            (reported, session.organizer())
        };
        let guard = PendingGuard::new(&handle, PendingOp::Complete);

        let rows = match self.store.get_result_rows(handle.id()).await {
            Ok(rows) => rows,
            Err(err) => {
                warn!(channel, error = %err, "Result read-back failed");
                return Err(err.into());
            }
        };
        let summary = build_summary(handle.id(), organizer, &reported, rows)?;

        let after = guard.commit(|session| {
            session.commit_complete()?;
            Ok(session.snapshot())
        })?;
        self.registry.retire_session(channel, handle.id());

        info!(
            channel,
            session_id = %after.session_id,
            entries = summary.entries.len(),
            "Results published"
        );
        self.events.publish_all(
            &after,
            [SessionTransition::Completed {
                summary: summary.clone(),
            }],
        );
        Ok(summary)
    }
}

fn rejected(op: &'static str, handle: &SessionHandle, user_id: UserId, err: &DomainError) {
    debug!(
        op,
        channel = handle.channel(),
        session_id = %handle.id(),
        user_id,
        code = %err.code(),
        "Session operation rejected"
    );
}

/// Rolls back a `begin_*` reservation unless the matching commit succeeds.
///
/// Dropping the guard (error return or a cancelled future) abandons the
/// pending operation so the session never stays blocked.
struct PendingGuard<'a> {
    handle: &'a SessionHandle,
    op: PendingOp,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(handle: &'a SessionHandle, op: PendingOp) -> Self {
        Self {
            handle,
            op,
            armed: true,
        }
    }

    fn commit<T>(
        mut self,
        apply: impl FnOnce(&mut Session) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let result = {
            let mut session = self.handle.lock();
            apply(&mut *session)
        };
        if result.is_ok() {
            self.armed = false;
        }
        result
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(
                channel = self.handle.channel(),
                session_id = %self.handle.id(),
                op = ?self.op,
                "Abandoning pending session operation"
            );
            self.handle.lock().abandon(self.op);
        }
    }
}
