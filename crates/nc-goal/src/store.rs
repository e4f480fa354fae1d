// store.rs — StateStore trait with JSON file and in-memory implementations.
//
// The whole State lives in one JSON document (`state.json` by default).
// Saves go through a sibling `.tmp` file and a rename so an interrupted
// write leaves the previous document intact.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::GoalError;
use crate::goal::State;

/// Load/save capability for the tracker's single State record.
pub trait StateStore {
    /// Load the State. If none exists yet, an empty State is created,
    /// persisted, and returned.
    fn load(&self) -> Result<State, GoalError>;

    /// Persist the full State, replacing whatever was stored before.
    fn save(&self, state: &State) -> Result<(), GoalError>;
}

/// State stored as a pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => self
                .path
                .with_file_name(format!("{}.tmp", name.to_string_lossy())),
            None => self.path.with_extension("tmp"),
        }
    }

    fn io_error(path: &Path, source: std::io::Error) -> GoalError {
        GoalError::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<State, GoalError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no state file, creating an empty one");
                let state = State::default();
                self.save(&state)?;
                return Ok(state);
            }
            Err(source) => return Err(Self::io_error(&self.path, source)),
        };

        let state: State =
            serde_json::from_str(&json).map_err(|source| GoalError::CorruptedState {
                path: self.path.display().to_string(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            goals = state.goals.len(),
            "loaded state"
        );
        Ok(state)
    }

    fn save(&self, state: &State) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Self::io_error(parent, source))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|source| Self::io_error(&temp_path, source))?;
        fs::rename(&temp_path, &self.path).map_err(|source| Self::io_error(&self.path, source))?;

        tracing::debug!(
            path = %self.path.display(),
            goals = state.goals.len(),
            "saved state"
        );
        Ok(())
    }
}

/// In-memory store. Counts writes so callers can check that a run left
/// storage untouched.
#[derive(Default)]
pub struct MemoryStore {
    state: RefCell<Option<State>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// An empty store, as on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`. Seeding does not count as a write.
    pub fn with_state(state: State) -> Self {
        Self {
            state: RefCell::new(Some(state)),
            writes: Cell::new(0),
        }
    }

    /// Number of `save()` calls so far, including the implicit one made by
    /// `load()` on an empty store.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Currently stored State, if any.
    pub fn snapshot(&self) -> Option<State> {
        self.state.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<State, GoalError> {
        if let Some(state) = self.state.borrow().as_ref() {
            return Ok(state.clone());
        }
        let state = State::default();
        self.save(&state)?;
        Ok(state)
    }

    fn save(&self, state: &State) -> Result<(), GoalError> {
        *self.state.borrow_mut() = Some(state.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
