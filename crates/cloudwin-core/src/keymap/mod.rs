//! Key code translation for streamed keyboard input.
//!
//! The remote input service reports HID usage IDs ([`RemoteKeyCode`]); the
//! windowing API exposes canonical [`Key`] values.  [`KeycodeTable`] is the
//! single translation point between the two.

pub mod canonical;
pub mod remote;

pub use canonical::Key;
pub use remote::{RemoteKeyCode, REMOTE_KEY_COUNT};

/// Immutable remote -> canonical key translation table.
///
/// Built once when the backend initialises and shared read-only afterwards.
/// Lookups are a bounds check plus an array index.
#[derive(Debug, Clone)]
pub struct KeycodeTable {
    keys: [Key; REMOTE_KEY_COUNT],
}

impl KeycodeTable {
    /// Builds the table: every slot defaults to [`Key::Unknown`] before the
    /// explicit mappings are applied.
    pub fn new() -> Self {
        Self {
            keys: remote::REMOTE_TO_KEY_TABLE,
        }
    }

    /// Translates a remote key code to a canonical [`Key`].
    ///
    /// Out-of-range and unmapped codes yield [`Key::Unknown`].
    pub fn translate(&self, code: RemoteKeyCode) -> Key {
        match code.index() {
            Some(idx) => self.keys[idx],
            None => Key::Unknown,
        }
    }

    /// Iterates over every explicitly mapped `(remote, canonical)` pair.
    pub fn mapped(&self) -> impl Iterator<Item = (RemoteKeyCode, Key)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, key)| **key != Key::Unknown)
            .map(|(idx, key)| (RemoteKeyCode(idx as u16), *key))
    }
}

impl Default for KeycodeTable {
    fn default() -> Self {
        Self::new()
    }
}
