//! Stream lifecycle notifications.

use serde::{Deserialize, Serialize};

/// State of the streaming session as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamState {
    Invalid,
    Starting,
    Started,
    Suspended,
    Exited,
}

impl StreamState {
    /// Returns `true` once the stream has ended and will not come back.
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamState::Exited)
    }
}

/// Event delivered on the process-wide lifecycle subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    StreamStateChanged(StreamState),
}
