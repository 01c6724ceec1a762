//! Application layer for the wrapper.
//!
//! - [`event`]: [`event::WindowEvent`] and the collector that turns backend
//!   callbacks into it.
//! - [`run_loop`]: [`run_loop::Application`], the single-handler frame loop.
//! - [`demo`]: the handler driven by the `cloudwin-demo` binary.

pub mod demo;
pub mod event;
pub mod run_loop;
