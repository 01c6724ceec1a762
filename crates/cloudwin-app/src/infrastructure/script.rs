//! Scripted input sessions.
//!
//! A script is a TOML file holding the remote input events the demo feeds
//! into its window, one frame at a time:
//!
//! ```toml
//! [[events]]
//! [events.KeyboardHotplug]
//! keyboard = 1
//! kind = "Attached"
//!
//! [[events]]
//! [events.Text]
//! action = "None"
//! cursor_action_modifier = "None"
//! text = "hello"
//! ```

use std::path::{Path, PathBuf};

use cloudwin_core::RemoteInputEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading input script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input script: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub events: Vec<RemoteInputEvent>,
}

impl InputScript {
    pub fn new(events: Vec<RemoteInputEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Parses a script from TOML text.
///
/// # Errors
///
/// [`ScriptError::Parse`] if the text is not a valid script.
pub fn parse_script(content: &str) -> Result<InputScript, ScriptError> {
    Ok(toml::from_str(content)?)
}

/// Reads a script from `path`.  Unlike the backend config, a missing file is
/// an error.
///
/// # Errors
///
/// [`ScriptError::Io`] if the file cannot be read, [`ScriptError::Parse`]
/// if it is malformed.
pub fn load_script(path: &Path) -> Result<InputScript, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&content)
}
