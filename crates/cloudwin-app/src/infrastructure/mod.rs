//! Infrastructure layer for the wrapper.
//!
//! Nothing in here is needed by [`crate::application::run_loop`]; it only
//! feeds the demo binary.

pub mod script;
