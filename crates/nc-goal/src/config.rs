// config.rs — Tracker configuration.
//
// The tracker keeps a single state file. `for_dir()` places it as
// `state.json` in the given directory, the layout the tracker has always
// used when run from a goals folder.

use std::path::{Path, PathBuf};

use crate::store::JsonFileStore;

/// Default state file name.
pub const STATE_FILE_NAME: &str = "state.json";

/// Where the tracker keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Path to the JSON state file.
    pub state_file: PathBuf,
}

impl TrackerConfig {
    /// Standard layout: `<dir>/state.json`.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            state_file: dir.as_ref().join(STATE_FILE_NAME),
        }
    }

    /// Use an explicit state file instead of the default location.
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }

    /// Open the store this config points at.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.state_file)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(STATE_FILE_NAME),
        }
    }
}
