//! Streaming service seam.
//!
//! The vendor SDK delivers input on per-window event queues and lifecycle
//! notifications on a process-wide queue.  [`StreamService`] models both as
//! `std::sync::mpsc` receivers: the backend owns the receiving end, the
//! service keeps the sender and pushes events from whatever thread it likes.
//!
//! Ids returned by `open_input_queue` and `subscribe_lifecycle` are handed
//! back to the matching close/unsubscribe call so the service can drop its
//! sender.

use std::fmt;
use std::sync::mpsc::Receiver;

use cloudwin_core::{LifecycleEvent, RemoteInputEvent};
use thiserror::Error;

pub mod loopback;

pub use loopback::{FailurePoint, LoopbackStreamService};

/// Error type for streaming service operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service library could not be initialized.
    #[error("stream service initialization failed: {0}")]
    InitFailed(String),

    /// A handler or subscription could not be registered.
    #[error("failed to register {what}: {reason}")]
    RegistrationFailed { what: &'static str, reason: String },

    /// The service is not initialized or has been stopped.
    #[error("stream service unavailable")]
    Unavailable,
}

/// Identifier of a per-window input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueId(pub u64);

/// Identifier of a lifecycle subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue-{}", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

/// Platform-agnostic streaming service.
pub trait StreamService: Send + Sync {
    /// Initializes the service library.  Called once at backend init.
    fn initialize(&self) -> Result<(), ServiceError>;

    /// Registers for stream state changes.
    fn subscribe_lifecycle(&self) -> Result<(SubscriptionId, Receiver<LifecycleEvent>), ServiceError>;

    fn unsubscribe_lifecycle(&self, id: SubscriptionId);

    /// Creates a private input queue for one window.
    fn open_input_queue(&self) -> Result<(QueueId, Receiver<RemoteInputEvent>), ServiceError>;

    fn close_input_queue(&self, id: QueueId);

    /// Asks the service to end the stream.  The service answers with an
    /// `Exited` lifecycle event.
    fn stop_stream(&self);
}
