//! Backend error type.

use cloudwin_core::{ErrorCode, WindowId};
use thiserror::Error;

use crate::infrastructure::stream_service::ServiceError;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("stream service initialization failed: {0}")]
    ServiceInit(#[source] ServiceError),

    #[error("failed to register stream lifecycle handler: {0}")]
    HandlerRegistration(#[source] ServiceError),

    #[error("failed to spawn lifecycle monitor thread: {0}")]
    MonitorSpawn(#[source] std::io::Error),

    #[error("failed to open window input queue: {0}")]
    WindowCreation(#[source] ServiceError),

    #[error("no such window: {0}")]
    NoSuchWindow(WindowId),

    #[error("{0} is not implemented by the streaming backend")]
    NotImplemented(&'static str),
}

impl BackendError {
    /// Init failures the process cannot recover from.  The binary exits
    /// non-zero on these without showing any UI.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BackendError::ServiceInit(_)
                | BackendError::HandlerRegistration(_)
                | BackendError::MonitorSpawn(_)
        )
    }

    /// Error category for the application's error callback.
    pub fn code(&self) -> ErrorCode {
        match self {
            BackendError::NoSuchWindow(_) => ErrorCode::NoWindowContext,
            _ => ErrorCode::PlatformError,
        }
    }
}
