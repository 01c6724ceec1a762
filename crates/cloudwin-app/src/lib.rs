//! cloudwin-app library entry point.
//!
//! A thin wrapper over [`cloudwin_backend::Platform`] for application code
//! that wants a frame loop instead of raw callbacks.
//!
//! # How events reach the application
//!
//! ```text
//! Application::execute()
//!  └─ per frame
//!       ├─ Platform::poll_events(EventCollector)   -- backend callbacks -> WindowEvent
//!       ├─ EventHandler::on_event(ctx, window, event) for each event
//!       ├─ EventHandler::on_frame(ctx)
//!       └─ destroy windows whose should-close flag is set
//! ```
//!
//! The loop ends when the handler calls [`Context::exit`] or the last window
//! is gone, which is also what happens when the stream exits: the backend
//! marks every window for closing and the wrapper destroys them.

/// Application layer: the event enum, the run loop and the demo handler.
pub mod application;

/// Infrastructure layer: scripted input sessions loaded from TOML.
pub mod infrastructure;

pub use application::event::{EventCollector, WindowEvent};
pub use application::run_loop::{AppError, Application, Context, EventHandler};
