//! cloudwin-backend library entry point.
//!
//! # What does the backend do?
//!
//! A cloud-streaming service renders an application on a remote machine and
//! forwards the player's keyboard, mouse and text input back to it.  The
//! application itself is written against an ordinary windowing API: it
//! creates windows, polls events once per frame and creates a Vulkan
//! surface to draw into.  This crate is the platform backend that sits
//! between the two:
//!
//! 1. [`Platform::init`] initializes the streaming service, subscribes to
//!    stream lifecycle notifications and starts a background monitor thread.
//! 2. Each window owns a private input queue plus a small registry of the
//!    mouse and keyboard devices attached to it.
//! 3. [`Platform::poll_events`] drains every window's queue on the caller's
//!    thread, translating remote events into canonical callbacks on an
//!    [`InputSink`].
//! 4. When the stream exits, the monitor thread asks every open window to
//!    close so the application can shut down cleanly.
//!
//! The streaming service and the Vulkan loader are both reached through
//! traits ([`StreamService`], [`VulkanInstance`]) so the whole backend runs
//! in-process against the loopback service in tests.

/// Application layer: per-window input processing and the lifecycle monitor.
pub mod application;

/// Infrastructure layer: streaming service adapters, Vulkan surface, config.
pub mod infrastructure;

/// Backend lifecycle and the platform window contract.
pub mod platform;

pub use application::consume_input::{InputSink, TextDecoding};
pub use infrastructure::storage::config::BackendConfig;
pub use infrastructure::stream_service::{LoopbackStreamService, ServiceError, StreamService};
pub use infrastructure::surface::{SurfaceHandle, VkResultCode, VulkanInstance};
pub use platform::{BackendError, ErrorCallback, Platform, Window, VERSION_STRING};
