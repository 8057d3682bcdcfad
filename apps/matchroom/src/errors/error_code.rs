//! Error codes for the matchroom API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the matchroom API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Acting user could not be determined
    Unauthorized,
    /// Operation reserved for the session organizer
    NotOrganizer,
    /// Organizer attempted to leave their own session
    IsOrganizer,
    /// Reporter is not on the roster
    NotParticipant,

    // Request Validation
    /// Outcome is neither a win nor a loss
    InvalidOutcome,
    /// Score outside the accepted range
    InvalidScore,
    /// Rank does not fit the reported outcome
    InvalidRankForOutcome,
    /// Comment too long
    InvalidComment,
    /// Empty game identifier
    InvalidGameId,
    /// Channel key could not be parsed
    InvalidChannel,
    /// Recruitment is not enabled in this channel
    ChannelNotAllowed,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// No live session in the channel
    SessionNotFound,
    /// No game identifier registered for the user
    GameIdNotFound,

    // Session State Conflicts
    /// Channel already has a live session
    AlreadyActive,
    /// Operation not allowed in the current session state
    WrongState,
    /// Session reached a terminal state
    SessionClosed,
    /// User is already on the roster
    AlreadyJoined,
    /// Roster is at capacity
    RosterFull,
    /// User is not on the roster
    NotJoined,
    /// Roster is not yet full
    RosterNotFull,
    /// Reporter already has an accepted report
    AlreadyReported,
    /// Not every participant has reported
    IncompleteReports,
    /// Another operation on this session has not finished yet
    OperationInFlight,

    // System Errors
    /// Participant store call failed
    CollaboratorFailure,
    /// Internal invariant violated
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotOrganizer => "NOT_ORGANIZER",
            Self::IsOrganizer => "IS_ORGANIZER",
            Self::NotParticipant => "NOT_PARTICIPANT",

            Self::InvalidOutcome => "INVALID_OUTCOME",
            Self::InvalidScore => "INVALID_SCORE",
            Self::InvalidRankForOutcome => "INVALID_RANK_FOR_OUTCOME",
            Self::InvalidComment => "INVALID_COMMENT",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidChannel => "INVALID_CHANNEL",
            Self::ChannelNotAllowed => "CHANNEL_NOT_ALLOWED",
            Self::BadRequest => "BAD_REQUEST",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::GameIdNotFound => "GAME_ID_NOT_FOUND",

            Self::AlreadyActive => "ALREADY_ACTIVE",
            Self::WrongState => "WRONG_STATE",
            Self::SessionClosed => "SESSION_CLOSED",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::RosterFull => "ROSTER_FULL",
            Self::NotJoined => "NOT_JOINED",
            Self::RosterNotFull => "ROSTER_NOT_FULL",
            Self::AlreadyReported => "ALREADY_REPORTED",
            Self::IncompleteReports => "INCOMPLETE_REPORTS",
            Self::OperationInFlight => "OPERATION_IN_FLIGHT",

            Self::CollaboratorFailure => "COLLABORATOR_FAILURE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
