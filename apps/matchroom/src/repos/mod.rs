//! Repository seams for external collaborators.

pub mod participants;

pub use participants::{ParticipantStore, StoreError};
