#![allow(dead_code)]

use std::sync::Arc;

use matchroom::domain::{ChannelKey, Outcome, ReportForm, SessionSnapshot, UserId};
use matchroom::{InMemoryParticipantStore, ParticipantStore, SessionFlowService};

#[ctor::ctor]
fn init_logging() {
    matchroom_test_support::logging::init();
}

pub const ORGANIZER: UserId = 1;

/// Players 1..=10; player 1 organizes.
pub fn players() -> Vec<UserId> {
    (1..=10).collect()
}

pub fn game_id_of(user: UserId) -> String {
    format!("GID-{user:04}")
}

/// In-memory store with a game id for every player in [`players`].
pub fn seeded_store() -> Arc<InMemoryParticipantStore> {
    Arc::new(
        InMemoryParticipantStore::new()
            .with_game_ids(players().into_iter().map(|u| (u, game_id_of(u)))),
    )
}

pub fn service_with(store: Arc<dyn ParticipantStore>) -> SessionFlowService {
    SessionFlowService::new(store).with_seed(0x5eed)
}

/// Start a session in `channel` and fill it with [`players`].
pub fn fill_channel(svc: &SessionFlowService, channel: ChannelKey) -> SessionSnapshot {
    svc.start_session(channel, ORGANIZER).unwrap();
    let mut last = None;
    for user in players().into_iter().skip(1) {
        last = Some(svc.join(channel, user).unwrap());
    }
    last.unwrap()
}

pub fn form(outcome: &str, score: f64, rank: i64) -> ReportForm {
    ReportForm {
        outcome: outcome.to_string(),
        score,
        rank,
        comment: None,
    }
}

/// A consistent report per team: team A wins with ranks 1..=5, team B loses
/// with ranks 6..=10, both in team order.
pub fn team_reports(snapshot: &SessionSnapshot) -> Vec<(UserId, ReportForm)> {
    let winners = snapshot.team_a.iter().enumerate().map(|(i, e)| {
        (e.user_id, form(Outcome::Win.as_str(), 20.0 - i as f64, i as i64 + 1))
    });
    let losers = snapshot.team_b.iter().enumerate().map(|(i, e)| {
        (e.user_id, form(Outcome::Loss.as_str(), 10.0 - i as f64, i as i64 + 6))
    });
    winners.chain(losers).collect()
}
