//! Vulkan presentation through the stream descriptor surface extension.
//!
//! The streamed display has no native window; Vulkan presents to the
//! service's primary stream descriptor instead.  The backend never loads
//! Vulkan itself.  It asks a [`VulkanInstance`] whether the instance exposes
//! `vkCreateStreamDescriptorSurfaceGGP` and forwards the call.
//!
//! Failures are not fatal: the caller reports them on the error channel and
//! hands the Vulkan result back to the application.

use std::fmt;

use cloudwin_core::ErrorCode;
use thiserror::Error;

/// Generic surface extension every presentation path needs.
pub const KHR_SURFACE_EXTENSION: &str = "VK_KHR_surface";

/// Extension providing `vkCreateStreamDescriptorSurfaceGGP`.
pub const STREAM_DESCRIPTOR_SURFACE_EXTENSION: &str = "VK_GGP_stream_descriptor_surface";

/// Opaque `VkSurfaceKHR` handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Raw `VkResult` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VkResultCode(pub i32);

impl VkResultCode {
    pub const SUCCESS: Self = Self(0);
    pub const ERROR_OUT_OF_HOST_MEMORY: Self = Self(-1);
    pub const ERROR_OUT_OF_DEVICE_MEMORY: Self = Self(-2);
    pub const ERROR_INITIALIZATION_FAILED: Self = Self(-3);
    pub const ERROR_DEVICE_LOST: Self = Self(-4);
    pub const ERROR_EXTENSION_NOT_PRESENT: Self = Self(-7);
    pub const ERROR_SURFACE_LOST_KHR: Self = Self(-1_000_000_000);
    pub const ERROR_NATIVE_WINDOW_IN_USE_KHR: Self = Self(-1_000_000_001);

    /// Human-readable description used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            Self::SUCCESS => "Success",
            Self::ERROR_OUT_OF_HOST_MEMORY => "A host memory allocation has failed",
            Self::ERROR_OUT_OF_DEVICE_MEMORY => "A device memory allocation has failed",
            Self::ERROR_INITIALIZATION_FAILED => {
                "Initialization of an object could not be completed for implementation-specific reasons"
            }
            Self::ERROR_DEVICE_LOST => "The logical or physical device has been lost",
            Self::ERROR_EXTENSION_NOT_PRESENT => "A requested extension is not supported",
            Self::ERROR_SURFACE_LOST_KHR => "A surface has been lost",
            Self::ERROR_NATIVE_WINDOW_IN_USE_KHR => {
                "The requested window is already connected to a VkSurfaceKHR, or to some other non-Vulkan API"
            }
            _ => "ERROR: UNKNOWN VULKAN ERROR",
        }
    }
}

impl fmt::Display for VkResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Which stream the surface presents to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamDescriptor {
    #[default]
    Primary,
}

/// Parameters of `vkCreateStreamDescriptorSurfaceGGP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamDescriptorSurfaceCreateInfo {
    pub stream_descriptor: StreamDescriptor,
}

/// The slice of a Vulkan instance the backend needs.
#[cfg_attr(test, mockall::automock)]
pub trait VulkanInstance {
    /// Whether `vkGetInstanceProcAddr` resolves the stream descriptor
    /// surface entry point on this instance.
    fn has_stream_descriptor_surface(&self) -> bool;

    fn create_stream_descriptor_surface(
        &self,
        info: &StreamDescriptorSurfaceCreateInfo,
    ) -> Result<SurfaceHandle, VkResultCode>;
}

/// Error type for surface creation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Vulkan instance missing VK_GGP_stream_descriptor_surface extension")]
    ExtensionMissing,

    #[error("Failed to create Vulkan surface: {0}")]
    CreationFailed(VkResultCode),
}

impl SurfaceError {
    /// Error category to report on the error channel.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SurfaceError::ExtensionMissing => ErrorCode::ApiUnavailable,
            SurfaceError::CreationFailed(_) => ErrorCode::PlatformError,
        }
    }

    /// `VkResult` to hand back to the application.
    pub fn vk_result(&self) -> VkResultCode {
        match self {
            SurfaceError::ExtensionMissing => VkResultCode::ERROR_EXTENSION_NOT_PRESENT,
            SurfaceError::CreationFailed(result) => *result,
        }
    }
}

/// Creates a surface on the primary stream descriptor.
///
/// # Errors
///
/// [`SurfaceError::ExtensionMissing`] if the entry point does not resolve,
/// [`SurfaceError::CreationFailed`] if the call itself fails.
pub fn create_stream_surface(instance: &dyn VulkanInstance) -> Result<SurfaceHandle, SurfaceError> {
    if !instance.has_stream_descriptor_surface() {
        return Err(SurfaceError::ExtensionMissing);
    }
    let info = StreamDescriptorSurfaceCreateInfo::default();
    instance
        .create_stream_descriptor_surface(&info)
        .map_err(SurfaceError::CreationFailed)
}

/// Instance extensions the application must enable, or `None` when the
/// loader does not offer both of them.
pub fn required_instance_extensions(available: &[&str]) -> Option<[&'static str; 2]> {
    let required = [KHR_SURFACE_EXTENSION, STREAM_DESCRIPTOR_SURFACE_EXTENSION];
    required
        .iter()
        .all(|ext| available.contains(ext))
        .then_some(required)
}
