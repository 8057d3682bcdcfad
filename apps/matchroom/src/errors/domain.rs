//! Domain-level error type used across the session core and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Every variant except `CollaboratorFailure` and `Invariant` is raised
//! before any session state is touched.

use thiserror::Error;

use crate::domain::{ChannelKey, Outcome, SessionPhase, UserId};
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("channel {0} already has a live session")]
    AlreadyActive(ChannelKey),
    #[error("operation requires a {expected} session, but it is {actual}")]
    WrongState {
        expected: SessionPhase,
        actual: SessionPhase,
    },
    #[error("session is {0} and accepts no further changes")]
    SessionClosed(SessionPhase),
    #[error("user {0} already joined")]
    AlreadyJoined(UserId),
    #[error("roster is full ({0} players)")]
    Full(usize),
    #[error("user {0} is not on the roster")]
    NotJoined(UserId),
    #[error("the organizer cannot leave their own session")]
    IsOrganizer,
    #[error("user {0} is not the organizer")]
    NotOrganizer(UserId),
    #[error("roster has {have} of {need} players")]
    NotFull { have: usize, need: usize },
    #[error("user {0} is not a participant")]
    NotParticipant(UserId),
    #[error("user {0} already reported")]
    AlreadyReported(UserId),
    #[error("outcome must be win or loss, got {0:?}")]
    InvalidOutcome(String),
    #[error("score {score} is outside {min}..={max}")]
    InvalidScore { score: f64, min: f64, max: f64 },
    #[error("rank {rank} is not valid for a {outcome}")]
    InvalidRankForOutcome { outcome: Outcome, rank: i64 },
    #[error("{reported} of {roster} participants have reported")]
    IncompleteReports { reported: usize, roster: usize },
    #[error("participant store failure: {0}")]
    CollaboratorFailure(String),

    #[error("recruitment is not enabled in channel {0}")]
    ChannelNotAllowed(ChannelKey),
    #[error("comment exceeds {max} characters")]
    InvalidComment { max: usize },
    #[error("game id must not be empty")]
    InvalidGameId,
    #[error("another operation on this session is still in progress")]
    OperationInFlight,
    #[error("no live session in channel {0}")]
    SessionNotFound(ChannelKey),
    #[error("no game id registered for user {0}")]
    GameIdNotFound(UserId),
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn collaborator(detail: impl Into<String>) -> Self {
        Self::CollaboratorFailure(detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyActive(_) => ErrorCode::AlreadyActive,
            Self::WrongState { .. } => ErrorCode::WrongState,
            Self::SessionClosed(_) => ErrorCode::SessionClosed,
            Self::AlreadyJoined(_) => ErrorCode::AlreadyJoined,
            Self::Full(_) => ErrorCode::RosterFull,
            Self::NotJoined(_) => ErrorCode::NotJoined,
            Self::IsOrganizer => ErrorCode::IsOrganizer,
            Self::NotOrganizer(_) => ErrorCode::NotOrganizer,
            Self::NotFull { .. } => ErrorCode::RosterNotFull,
            Self::NotParticipant(_) => ErrorCode::NotParticipant,
            Self::AlreadyReported(_) => ErrorCode::AlreadyReported,
            Self::InvalidOutcome(_) => ErrorCode::InvalidOutcome,
            Self::InvalidScore { .. } => ErrorCode::InvalidScore,
            Self::InvalidRankForOutcome { .. } => ErrorCode::InvalidRankForOutcome,
            Self::IncompleteReports { .. } => ErrorCode::IncompleteReports,
            Self::CollaboratorFailure(_) => ErrorCode::CollaboratorFailure,
            Self::ChannelNotAllowed(_) => ErrorCode::ChannelNotAllowed,
            Self::InvalidComment { .. } => ErrorCode::InvalidComment,
            Self::InvalidGameId => ErrorCode::InvalidGameId,
            Self::OperationInFlight => ErrorCode::OperationInFlight,
            Self::SessionNotFound(_) => ErrorCode::SessionNotFound,
            Self::GameIdNotFound(_) => ErrorCode::GameIdNotFound,
            Self::Invariant(_) => ErrorCode::Internal,
        }
    }

    /// Whether the caller can fix the request or retry it as-is.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}
