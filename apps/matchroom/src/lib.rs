#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Match-session lifecycle for a chat community: recruit ten players in a
//! channel, split them into two seeded teams with a host, collect every
//! player's outcome report, and publish a ranked summary.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod events;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use adapters::InMemoryParticipantStore;
pub use config::{MatchRules, ServerConfig};
pub use error::{AppError, ProblemDetails};
pub use errors::{DomainError, ErrorCode};
pub use events::{SessionEvent, SessionEventHub};
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use repos::{ParticipantStore, StoreError};
pub use services::{PlayerService, SessionFlowService, SessionRegistry};
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    matchroom_test_support::logging::init();
}
