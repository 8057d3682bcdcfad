//! Services bridging the pure session core with the registry, the
//! participant store and the event hub.

pub mod players;
pub mod registry;
pub mod session_flow;

pub use players::PlayerService;
pub use registry::{SessionHandle, SessionRef, SessionRegistry};
pub use session_flow::SessionFlowService;
