//! In-process [`StreamService`] used by tests and the demo binary.
//!
//! Nothing leaves the process: input is injected by calling [`inject`] or
//! [`inject_all`], lifecycle changes by calling [`publish`].  `stop_stream`
//! behaves like the real service and answers with an `Exited` notification
//! to every subscriber.
//!
//! [`inject`]: LoopbackStreamService::inject
//! [`inject_all`]: LoopbackStreamService::inject_all
//! [`publish`]: LoopbackStreamService::publish
//!
//! # Failure injection
//!
//! [`LoopbackStreamService::failing_at`] builds a service whose chosen
//! operation always fails, so the fatal init paths of the backend can be
//! exercised without a broken SDK.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cloudwin_core::{LifecycleEvent, RemoteInputEvent, StreamState};
use tracing::{debug, info};

use super::{QueueId, ServiceError, StreamService, SubscriptionId};

/// Operation a [`LoopbackStreamService`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Initialize,
    SubscribeLifecycle,
    OpenInputQueue,
}

#[derive(Debug, Default)]
struct LoopbackState {
    next_id: u64,
    initialized: bool,
    stopped: bool,
    queues: Vec<(QueueId, Sender<RemoteInputEvent>)>,
    subscribers: Vec<(SubscriptionId, Sender<LifecycleEvent>)>,
    fail_at: Option<FailurePoint>,
}

impl LoopbackState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn broadcast(&mut self, event: &LifecycleEvent) -> usize {
        // Subscribers whose receiver is gone are dropped here.
        self.subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        self.subscribers.len()
    }
}

#[derive(Debug, Default)]
pub struct LoopbackStreamService {
    state: Mutex<LoopbackState>,
}

impl LoopbackStreamService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a service whose `point` operation always fails.
    pub fn failing_at(point: FailurePoint) -> Self {
        let service = Self::new();
        service.lock().fail_at = Some(point);
        service
    }

    fn lock(&self) -> MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes `event` onto one window queue.  Returns `false` if the queue is
    /// closed or unknown.
    pub fn inject(&self, queue: QueueId, event: RemoteInputEvent) -> bool {
        let state = self.lock();
        state
            .queues
            .iter()
            .find(|(id, _)| *id == queue)
            .map_or(false, |(_, tx)| tx.send(event).is_ok())
    }

    /// Pushes a copy of `event` onto every open queue.  Returns how many
    /// queues received it.
    pub fn inject_all(&self, event: RemoteInputEvent) -> usize {
        let state = self.lock();
        state
            .queues
            .iter()
            .filter(|(_, tx)| tx.send(event.clone()).is_ok())
            .count()
    }

    /// Delivers a lifecycle event to every subscriber.  Returns how many
    /// subscribers received it.
    pub fn publish(&self, event: LifecycleEvent) -> usize {
        self.lock().broadcast(&event)
    }

    pub fn open_queues(&self) -> Vec<QueueId> {
        self.lock().queues.iter().map(|(id, _)| *id).collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl StreamService for LoopbackStreamService {
    fn initialize(&self) -> Result<(), ServiceError> {
        let mut state = self.lock();
        if state.fail_at == Some(FailurePoint::Initialize) {
            return Err(ServiceError::InitFailed("loopback configured to fail".to_string()));
        }
        state.initialized = true;
        info!("loopback stream service initialized");
        Ok(())
    }

    fn subscribe_lifecycle(&self) -> Result<(SubscriptionId, Receiver<LifecycleEvent>), ServiceError> {
        let mut state = self.lock();
        if !state.initialized {
            return Err(ServiceError::Unavailable);
        }
        if state.fail_at == Some(FailurePoint::SubscribeLifecycle) {
            return Err(ServiceError::RegistrationFailed {
                what: "lifecycle handler",
                reason: "loopback configured to fail".to_string(),
            });
        }
        let id = SubscriptionId(state.allocate_id());
        let (tx, rx) = mpsc::channel();
        state.subscribers.push((id, tx));
        debug!(%id, "lifecycle subscription added");
        Ok((id, rx))
    }

    fn unsubscribe_lifecycle(&self, id: SubscriptionId) {
        self.lock().subscribers.retain(|(sub, _)| *sub != id);
        debug!(%id, "lifecycle subscription removed");
    }

    fn open_input_queue(&self) -> Result<(QueueId, Receiver<RemoteInputEvent>), ServiceError> {
        let mut state = self.lock();
        if !state.initialized {
            return Err(ServiceError::Unavailable);
        }
        if state.fail_at == Some(FailurePoint::OpenInputQueue) {
            return Err(ServiceError::RegistrationFailed {
                what: "input queue",
                reason: "loopback configured to fail".to_string(),
            });
        }
        let id = QueueId(state.allocate_id());
        let (tx, rx) = mpsc::channel();
        state.queues.push((id, tx));
        debug!(%id, "input queue opened");
        Ok((id, rx))
    }

    fn close_input_queue(&self, id: QueueId) {
        self.lock().queues.retain(|(queue, _)| *queue != id);
        debug!(%id, "input queue closed");
    }

    fn stop_stream(&self) {
        let mut state = self.lock();
        if state.stopped {
            return;
        }
        state.stopped = true;
        let notified = state.broadcast(&LifecycleEvent::StreamStateChanged(StreamState::Exited));
        info!(subscribers = notified, "loopback stream stopped");
    }
}
