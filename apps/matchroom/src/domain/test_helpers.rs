use crate::config::MatchRules;
use crate::domain::reports::ReportForm;
use crate::domain::session::Session;
use crate::domain::teams::allocate;
use crate::domain::{SessionId, UserId};

/// Recruiting session whose roster is `organizer, organizer + 1, ...` up to `count` players.
pub fn filled_session(organizer: UserId, count: usize) -> Session {
    let mut session = Session::new(
        SessionId::from("game-2505240000-00000001"),
        100,
        organizer,
        MatchRules::default(),
    );
    for user in (organizer + 1..).take(count.saturating_sub(1)) {
        session.join(user).expect("join while filling");
    }
    session
}

/// Ten players (1..=10, organizer 1) already split into teams.
pub fn reporting_session() -> Session {
    let mut session = filled_session(1, 10);
    let roster = session.begin_finalize(1).expect("finalize");
    let allocation = allocate(&roster, 7).expect("allocate");
    session
        .commit_finalize(allocation, "GID-0001".to_string())
        .expect("commit finalize");
    session
}

pub fn report(outcome: &str, score: f64, rank: i64) -> ReportForm {
    ReportForm {
        outcome: outcome.to_string(),
        score,
        rank,
        comment: None,
    }
}
