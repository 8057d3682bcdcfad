//! Final results summary built from the stored result rows.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::reports::{Outcome, ResultRow};
use crate::domain::{SessionId, UserId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub user_id: UserId,
    pub outcome: Outcome,
    pub score: f64,
    pub rank: u8,
    pub comment: Option<String>,
    pub is_organizer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub session_id: SessionId,
    pub organizer: UserId,
    /// Ascending by rank; equal ranks keep submission order.
    pub entries: Vec<SummaryEntry>,
}

impl ResultSummary {
    /// Plain-text lines for the results announcement, one per entry.
    pub fn render_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                let marker = if entry.is_organizer { " (organizer)" } else { "" };
                format!(
                    "<@{}>{} | rank: {} | result: {} | score: {} | comment: {}",
                    entry.user_id,
                    marker,
                    entry.rank,
                    entry.outcome,
                    entry.score,
                    entry.comment.as_deref().unwrap_or("none"),
                )
            })
            .collect()
    }
}

/// Build the summary for `session_id` from the store's rows.
///
/// Rows are expected in append order. Only the first row per reported
/// participant counts; rows for other sessions or non-reporters are ignored.
/// A reported participant with no row means the store lost data.
pub fn build_summary(
    session_id: &SessionId,
    organizer: UserId,
    reported: &[UserId],
    rows: Vec<ResultRow>,
) -> Result<ResultSummary, DomainError> {
    let expected: HashSet<UserId> = reported.iter().copied().collect();
    let mut seen = HashSet::with_capacity(expected.len());

    let mut entries: Vec<SummaryEntry> = rows
        .into_iter()
        .filter(|row| &row.session_id == session_id)
        .filter(|row| expected.contains(&row.user_id) && seen.insert(row.user_id))
        .map(|row| SummaryEntry {
            user_id: row.user_id,
            outcome: row.outcome,
            score: row.score,
            rank: row.rank,
            comment: row.comment,
            is_organizer: row.user_id == organizer,
        })
        .collect();

    if entries.len() != expected.len() {
        let missing: Vec<String> = reported
            .iter()
            .filter(|user| !seen.contains(*user))
            .map(|user| user.to_string())
            .collect();
        return Err(DomainError::collaborator(format!(
            "result rows missing for session {session_id}: {}",
            missing.join(", ")
        )));
    }

    // Stable sort keeps store order for equal ranks.
    entries.sort_by_key(|entry| entry.rank);

    Ok(ResultSummary {
        session_id: session_id.clone(),
        organizer,
        entries,
    })
}
