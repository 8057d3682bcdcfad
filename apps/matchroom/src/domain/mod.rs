//! Domain layer: the session lifecycle state machine and its pure helpers.
//!
//! Nothing in here awaits or locks; callers serialize access to a
//! [`Session`] and perform store I/O between the `begin_*` and `commit_*`
//! halves of a transition.

pub mod ids;
pub mod reports;
pub mod roster;
pub mod session;
pub mod snapshot;
pub mod summary;
pub mod teams;
pub mod transition;

#[cfg(test)]
mod test_helpers;

// Re-exports for ergonomics
pub use ids::{ChannelKey, SessionId, UserId};
pub use reports::{validate_report, Outcome, Report, ReportBook, ReportForm, ResultRow};
pub use roster::Roster;
pub use session::{PendingOp, Session, SessionPhase};
pub use snapshot::{RosterEntry, SessionSnapshot};
pub use summary::{build_summary, ResultSummary, SummaryEntry};
pub use teams::{allocate, TeamAllocation};
pub use transition::{derive_transitions, SessionTransition};
