//! Canonical input vocabulary shared by the backend and the application layer.
//!
//! Nothing in here knows about the streaming service: these are the values the
//! windowing API hands to application code.

pub mod error;
pub mod input;
pub mod window;
