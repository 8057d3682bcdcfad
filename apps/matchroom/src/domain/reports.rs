//! Outcome reports: validation and the per-session collector.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MatchRules;
use crate::domain::{SessionId, UserId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = DomainError;

    /// Accepts `win`/`loss` in any case, plus the community's `勝ち`/`負け`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "win" | "勝ち" => Ok(Outcome::Win),
            "loss" | "負け" => Ok(Outcome::Loss),
            _ => Err(DomainError::InvalidOutcome(trimmed.to_string())),
        }
    }
}

/// Unvalidated report as submitted by a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportForm {
    pub outcome: String,
    pub score: f64,
    pub rank: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A report that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub reporter: UserId,
    pub outcome: Outcome,
    pub score: f64,
    pub rank: u8,
    pub comment: Option<String>,
}

/// One row of the result log as the participant store persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub outcome: Outcome,
    pub score: f64,
    pub rank: u8,
    pub comment: Option<String>,
}

impl ResultRow {
    pub fn from_report(session_id: &SessionId, report: &Report) -> Self {
        Self {
            session_id: session_id.clone(),
            user_id: report.reporter,
            outcome: report.outcome,
            score: report.score,
            rank: report.rank,
            comment: report.comment.clone(),
        }
    }
}

/// Check outcome, score, rank and comment, in that order.
pub fn validate_report(
    rules: &MatchRules,
    reporter: UserId,
    form: &ReportForm,
) -> Result<Report, DomainError> {
    let outcome: Outcome = form.outcome.parse()?;

    let score = form.score;
    if !score.is_finite() || score < rules.score_min || score > rules.score_max {
        return Err(DomainError::InvalidScore {
            score,
            min: rules.score_min,
            max: rules.score_max,
        });
    }

    let allowed = match outcome {
        Outcome::Win => &rules.win_ranks,
        Outcome::Loss => &rules.loss_ranks,
    };
    let rank = match u8::try_from(form.rank) {
        Ok(rank) if allowed.contains(&form.rank) => rank,
        _ => {
            return Err(DomainError::InvalidRankForOutcome {
                outcome,
                rank: form.rank,
            })
        }
    };

    let comment = form
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    if let Some(text) = &comment {
        if text.chars().count() > rules.comment_max_chars {
            return Err(DomainError::InvalidComment {
                max: rules.comment_max_chars,
            });
        }
    }

    Ok(Report {
        reporter,
        outcome,
        score,
        rank,
        comment,
    })
}

/// Which participants have an accepted report, in acceptance order, plus the
/// reporters whose store append is still outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBook {
    accepted: Vec<UserId>,
    pending: HashSet<UserId>,
}

impl ReportBook {
    pub fn has_reported(&self, user: UserId) -> bool {
        self.accepted.contains(&user)
    }

    pub fn is_pending(&self, user: UserId) -> bool {
        self.pending.contains(&user)
    }

    pub fn begin(&mut self, user: UserId) {
        self.pending.insert(user);
    }

    /// Moves a pending reporter to accepted. Returns false if it was not pending.
    pub fn accept(&mut self, user: UserId) -> bool {
        if !self.pending.remove(&user) {
            return false;
        }
        self.accepted.push(user);
        true
    }

    pub fn abandon(&mut self, user: UserId) {
        self.pending.remove(&user);
    }

    pub fn accepted(&self) -> &[UserId] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn covers(&self, roster: &[UserId]) -> bool {
        roster.iter().all(|user| self.has_reported(*user))
    }
}
