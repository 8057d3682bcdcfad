pub mod hub;

pub use hub::{SessionEvent, SessionEventHub};
