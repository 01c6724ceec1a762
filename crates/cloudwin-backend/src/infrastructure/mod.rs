//! Infrastructure layer of the backend.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cloudwin_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`stream_service`** – The [`stream_service::StreamService`] seam over the
//!   vendor streaming SDK, plus an in-process loopback implementation.
//!
//! - **`surface`** – Vulkan stream-descriptor surface creation behind the
//!   [`surface::VulkanInstance`] trait.
//!
//! - **`storage`** – TOML configuration for the backend.

pub mod storage;
pub mod stream_service;
pub mod surface;
