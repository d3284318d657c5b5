use super::SessionState;
use crate::core::error::AgentError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Host storage for one session's state.
pub trait SessionStore: Send {
    fn load(&self) -> Result<SessionState, AgentError>;
    fn save(&mut self, state: &SessionState) -> Result<(), AgentError>;
}

/// JSON file per workspace, e.g. `~/.bestagent/sessions/<key>.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable session file is moved aside.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<SessionState, AgentError> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(state) => Ok(state),
            Err(e) => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "unreadable session moved aside"
                );
                Ok(SessionState::default())
            }
        }
    }

    /// Writes to a temporary file next to the target and renames it into
    /// place, so a failed write never truncates the previous session.
    fn save(&mut self, state: &SessionState) -> Result<(), AgentError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, state)?;
        file.persist(&self.path).map_err(|e| e.error)?;
        tracing::trace!(
            path = %self.path.display(),
            messages = state.messages.len(),
            "session saved"
        );
        Ok(())
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after moving one into a [`Session`](super::Session).
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<SessionState>>,
    saves: Arc<Mutex<usize>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SessionState) -> Self {
        Self {
            slot: Arc::new(Mutex::new(state)),
            saves: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionState, AgentError> {
        Ok(self.snapshot())
    }

    fn save(&mut self, state: &SessionState) -> Result<(), AgentError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AgentError::Io {
                source: std::io::Error::other("session store lock poisoned"),
            })?;
        *slot = state.clone();
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}
