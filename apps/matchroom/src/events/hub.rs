//! Fan-out of session transitions to the rendering layer.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::{ChannelKey, SessionId, SessionSnapshot, SessionTransition};

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEvent {
    pub channel: ChannelKey,
    pub session_id: SessionId,
    pub transition: SessionTransition,
    /// State right after the transition.
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Clone)]
pub struct SessionEventHub {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish without blocking; dropped when nobody is listening.
    pub fn publish(&self, event: SessionEvent) {
        let channel = event.channel;
        if self.sender.send(event).is_err() {
            trace!(channel, "No subscribers for session event");
        }
    }

    pub fn publish_all(
        &self,
        snapshot: &SessionSnapshot,
        transitions: impl IntoIterator<Item = SessionTransition>,
    ) {
        for transition in transitions {
            self.publish(SessionEvent {
                channel: snapshot.channel,
                session_id: snapshot.session_id.clone(),
                transition,
                snapshot: snapshot.clone(),
            });
        }
    }
}

impl Default for SessionEventHub {
    fn default() -> Self {
        Self::new()
    }
}
