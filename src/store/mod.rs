//! Persistence and text import/export of [`CanvasState`].
//!
//! The [`CanvasStore`] contract mirrors browser local storage: writes that
//! fail (quota, I/O) are logged and dropped, and a stored blob that no longer
//! decodes loads as absent. Nothing here interrupts an editing session.

use crate::canvas::CanvasState;
use crate::error::{ImportError, StoreError};
use serde_json::Value;
use tracing::{error, warn};

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// In-memory canvas storage, the analogue of browser local storage.
pub type MemoryStore = KeyedStore<MemoryBackend>;
/// Canvas storage as JSON files in a directory.
pub type FileStore = KeyedStore<FileBackend>;

/// Key under which the canvas is stored.
pub const STORAGE_KEY: &str = "prompt-programming-env-canvas";

/// Raw key/value access implemented by each backend.
pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Save/load of a single canvas snapshot. Failures never reach the caller.
pub trait CanvasStore {
    fn save(&mut self, state: &CanvasState);
    fn load(&self) -> Option<CanvasState>;
    fn clear(&mut self);
}

/// Binds a [`Backend`] to a storage key.
#[derive(Debug, Clone)]
pub struct KeyedStore<B> {
    backend: B,
    key: String,
}

impl<B: Backend> KeyedStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn try_save(&mut self, state: &CanvasState) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(state)?;
        self.backend.set(&self.key, &serialized)
    }

    fn try_load(&self) -> Result<Option<CanvasState>, StoreError> {
        match self.backend.get(&self.key)? {
            Some(serialized) if !serialized.is_empty() => Ok(Some(serde_json::from_str(&serialized)?)),
            _ => Ok(None),
        }
    }
}

impl<B: Backend> CanvasStore for KeyedStore<B> {
    fn save(&mut self, state: &CanvasState) {
        if let Err(e) = self.try_save(state) {
            error!(key = %self.key, error = %e, "failed to save canvas state");
        }
    }

    fn load(&self) -> Option<CanvasState> {
        self.try_load().unwrap_or_else(|e| {
            error!(key = %self.key, error = %e, "failed to load canvas state");
            None
        })
    }

    fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            error!(key = %self.key, error = %e, "failed to clear canvas state");
        }
    }
}

/// Pretty-printed JSON suitable for saving to a file and importing later.
pub fn export_text(state: &CanvasState) -> String {
    // Serializing plain structs with string keys cannot fail.
    serde_json::to_string_pretty(state).unwrap_or_default()
}

/// Parses exported text back into a canvas.
///
/// Only the presence of `blocks` and `connections` arrays is checked
/// explicitly; anything else that does not decode is reported as malformed.
pub fn import_text(text: &str) -> Result<CanvasState, ImportError> {
    let result = decode(text);
    if let Err(e) = &result {
        warn!(error = %e, "failed to import canvas state");
    }
    result
}

fn decode(text: &str) -> Result<CanvasState, ImportError> {
    let parsed: Value = serde_json::from_str(text).map_err(ImportError::Json)?;
    if !parsed.get("blocks").is_some_and(Value::is_array) {
        return Err(ImportError::MissingBlocks);
    }
    if !parsed.get("connections").is_some_and(Value::is_array) {
        return Err(ImportError::MissingConnections);
    }
    serde_json::from_value(parsed).map_err(ImportError::Malformed)
}
