//! Best score persistence
//!
//! Features:
//! - One string value per key, behind the [`ScoreStore`] trait
//! - LocalStorage backend on the web, file backend on native
//! - Storage failures degrade to an in-memory score for the session

pub mod best;

pub use best::{BestScore, parse_best};

use std::collections::HashMap;

use thiserror::Error;

/// Storage identifier for the best score
pub const STORAGE_KEY: &str = "gravity_switcher_best";

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Key-value string storage that survives process restarts
pub trait ScoreStore {
    /// Read the value stored under `key`, `None` if absent
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`
    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, used for tests and when no backend exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.data.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a truncated value
        let tmp = self.path(&format!("{key}.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}
