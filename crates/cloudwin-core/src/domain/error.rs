//! Error codes reported through the windowing API's error channel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error category delivered to the application's error callback.
///
/// The numeric values match the windowing library's public error constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ErrorCode {
    NotInitialized = 0x0001_0001,
    NoCurrentContext = 0x0001_0002,
    InvalidEnum = 0x0001_0003,
    InvalidValue = 0x0001_0004,
    OutOfMemory = 0x0001_0005,
    /// A required API (e.g. a Vulkan extension) is missing.
    ApiUnavailable = 0x0001_0006,
    VersionUnavailable = 0x0001_0007,
    /// The platform or remote service reported a failure.
    PlatformError = 0x0001_0008,
    FormatUnavailable = 0x0001_0009,
    NoWindowContext = 0x0001_000A,
}

impl ErrorCode {
    /// Returns the numeric error constant.
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} (0x{:08X})", self.code())
    }
}
