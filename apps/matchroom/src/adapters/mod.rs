//! Concrete participant store implementations.

pub mod participants_mem;

pub use participants_mem::InMemoryParticipantStore;
