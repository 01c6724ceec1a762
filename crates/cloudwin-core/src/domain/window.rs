//! Window identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a window created by the backend.
///
/// Input callbacks are addressed by `WindowId` rather than by reference so
/// the generic layer can look up its own per-window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub Uuid);

impl WindowId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_window_ids_are_distinct() {
        assert_ne!(WindowId::new(), WindowId::new());
    }

    #[test]
    fn test_display_matches_inner_uuid() {
        let id = WindowId::new();
        assert_eq!(id.to_string(), id.0.to_string());
    }
}
