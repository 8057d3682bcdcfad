//! End-to-end lifecycle through the session flow service.

mod common;

use std::collections::HashSet;

use common::{fill_channel, form, game_id_of, seeded_store, service_with, team_reports, ORGANIZER};
use matchroom::domain::{SessionPhase, SessionTransition, UserId};
use matchroom::{DomainError, SessionEvent};
use tokio::sync::broadcast::error::TryRecvError;

const CHANNEL: u64 = 1375690178651488308;

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionTransition> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event.transition),
            Err(TryRecvError::Empty) => return out,
            Err(err) => panic!("event stream broken: {err}"),
        }
    }
}

#[tokio::test]
async fn test_full_match_lifecycle() {
    let store = seeded_store();
    let svc = service_with(store.clone());
    let mut rx = svc.events().subscribe();

    let recruiting = fill_channel(&svc, CHANNEL);
    assert_eq!(recruiting.status, SessionPhase::Recruiting);
    assert_eq!(recruiting.roster.len(), 10);
    assert!(recruiting.session_id.as_str().starts_with("game-"));

    let events = drain(&mut rx);
    assert_eq!(events[0], SessionTransition::Started { organizer: ORGANIZER });
    assert_eq!(events.len(), 10);

    // Only the organizer may finalize.
    assert_eq!(
        svc.finalize(CHANNEL, 4).await.unwrap_err(),
        DomainError::NotOrganizer(4)
    );

    let reporting = svc.finalize(CHANNEL, ORGANIZER).await.unwrap();
    assert_eq!(reporting.status, SessionPhase::Reporting);
    assert_eq!(reporting.team_a.len(), 5);
    assert_eq!(reporting.team_b.len(), 5);

    let roster: HashSet<UserId> = reporting.roster_ids().into_iter().collect();
    let a: HashSet<UserId> = reporting.team_a.iter().map(|e| e.user_id).collect();
    let b: HashSet<UserId> = reporting.team_b.iter().map(|e| e.user_id).collect();
    assert!(a.is_disjoint(&b));
    assert_eq!(a.union(&b).copied().collect::<HashSet<_>>(), roster);

    let host = reporting.host.unwrap();
    assert!(roster.contains(&host));
    assert_eq!(reporting.host_game_id, Some(game_id_of(host)));
    assert!(matches!(
        drain(&mut rx).as_slice(),
        [SessionTransition::Finalized { host: h, .. }] if *h == host
    ));

    // Recruiting operations are over.
    assert!(matches!(
        svc.join(CHANNEL, 99),
        Err(DomainError::WrongState { .. })
    ));

    let reports = team_reports(&reporting);
    let (first, _) = reports[0].clone();
    for (reporter, report) in &reports[..9] {
        svc.submit_report(CHANNEL, *reporter, report.clone())
            .await
            .unwrap();
    }
    assert_eq!(
        svc.submit_report(CHANNEL, first, form("win", 10.0, 1))
            .await
            .unwrap_err(),
        DomainError::AlreadyReported(first)
    );
    assert!(matches!(
        svc.complete(CHANNEL, ORGANIZER).await,
        Err(DomainError::IncompleteReports {
            reported: 9,
            roster: 10
        })
    ));

    let (last, last_report) = reports[9].clone();
    let snap = svc.submit_report(CHANNEL, last, last_report).await.unwrap();
    assert_eq!(snap.reports_received, 10);
    assert!(snap.roster.iter().all(|e| e.reported));

    let summary = svc.complete(CHANNEL, ORGANIZER).await.unwrap();
    let ranks: Vec<u8> = summary.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<u8>>());
    let organizer_entries: Vec<_> = summary.entries.iter().filter(|e| e.is_organizer).collect();
    assert_eq!(organizer_entries.len(), 1);
    assert_eq!(organizer_entries[0].user_id, ORGANIZER);
    assert_eq!(summary.render_lines().len(), 10);
    assert_eq!(store.result_row_count(), 10);

    let tail = drain(&mut rx);
    assert!(matches!(tail.last(), Some(SessionTransition::Completed { .. })));
    assert_eq!(
        tail.iter()
            .filter(|t| matches!(t, SessionTransition::ReportRecorded { .. }))
            .count(),
        10
    );

    // The channel is free again.
    assert_eq!(
        svc.snapshot(CHANNEL).unwrap_err(),
        DomainError::SessionNotFound(CHANNEL)
    );
    let next = svc.start_session(CHANNEL, 5).unwrap();
    assert_ne!(next.session_id, summary.session_id);
}

#[tokio::test]
async fn test_reporting_rejects_outsiders_and_bad_reports() {
    let svc = service_with(seeded_store());
    fill_channel(&svc, CHANNEL);
    let snap = svc.finalize(CHANNEL, ORGANIZER).await.unwrap();
    let winner = snap.team_a[0].user_id;

    assert_eq!(
        svc.submit_report(CHANNEL, 77, form("win", 10.0, 1))
            .await
            .unwrap_err(),
        DomainError::NotParticipant(77)
    );
    assert!(matches!(
        svc.submit_report(CHANNEL, winner, form("draw", 10.0, 1)).await,
        Err(DomainError::InvalidOutcome(_))
    ));
    assert!(matches!(
        svc.submit_report(CHANNEL, winner, form("win", 31.0, 1)).await,
        Err(DomainError::InvalidScore { .. })
    ));
    assert!(matches!(
        svc.submit_report(CHANNEL, winner, form("win", 10.0, 6)).await,
        Err(DomainError::InvalidRankForOutcome { rank: 6, .. })
    ));

    // Rejected submissions leave no trace; a valid one still goes through.
    let snap = svc
        .submit_report(CHANNEL, winner, form("勝ち", 3.0, 5))
        .await
        .unwrap();
    assert_eq!(snap.reports_received, 1);
}

#[tokio::test]
async fn test_organizer_cannot_leave_and_delete_is_organizer_only() {
    let svc = service_with(seeded_store());
    svc.start_session(CHANNEL, ORGANIZER).unwrap();
    svc.join(CHANNEL, 2).unwrap();

    assert_eq!(svc.leave(CHANNEL, ORGANIZER).unwrap_err(), DomainError::IsOrganizer);
    assert_eq!(svc.join(CHANNEL, 2).unwrap_err(), DomainError::AlreadyJoined(2));
    assert_eq!(svc.leave(CHANNEL, 3).unwrap_err(), DomainError::NotJoined(3));
    assert_eq!(svc.delete(CHANNEL, 2).unwrap_err(), DomainError::NotOrganizer(2));
    assert_eq!(
        svc.start_session(CHANNEL, 2).unwrap_err(),
        DomainError::AlreadyActive(CHANNEL)
    );

    let mut rx = svc.events().subscribe();
    svc.delete(CHANNEL, ORGANIZER).unwrap();
    assert_eq!(drain(&mut rx), vec![SessionTransition::Deleted]);
    assert!(svc.registry().is_empty());
}

#[tokio::test]
async fn test_finalize_requires_full_roster() {
    let svc = service_with(seeded_store());
    svc.start_session(CHANNEL, ORGANIZER).unwrap();
    for user in 2..=9 {
        svc.join(CHANNEL, user).unwrap();
    }
    assert_eq!(
        svc.finalize(CHANNEL, ORGANIZER).await.unwrap_err(),
        DomainError::NotFull { have: 9, need: 10 }
    );
    svc.join(CHANNEL, 10).unwrap();
    assert_eq!(svc.join(CHANNEL, 11).unwrap_err(), DomainError::Full(10));
    assert!(svc.finalize(CHANNEL, ORGANIZER).await.is_ok());
}
