//! Key-value persistence for presentation state
//!
//! Chart toggles and the last spoken answer live here, behind a small
//! get/set interface so the CLI and server can choose where they are kept.
//! Nothing in [`crate::insights`] depends on this module.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Granularity;

/// Key for [`ChartPreferences`]
pub const PREFERENCES_KEY: &str = "chart_preferences";

/// Key for the most recent assistant answer
pub const LAST_ANSWER_KEY: &str = "last_answer";

/// Trait for key-value stores
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// Every write rewrites the whole file through a temp file in the same
/// directory, so readers never observe a partial file.
///
/// Writes are serialized per instance only. Each update re-reads the file
/// first, but two processes updating the same file at the same moment can
/// still lose one of the updates: give concurrent processes (for example
/// `surplus chat` alongside `surplus serve`) separate `--store` files.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, Value>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::Store(format!(
                "Store file {} is not a JSON object: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, entries: &HashMap<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Store(format!("Failed to save {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, Value>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Store("file store lock poisoned".to_string()))?;
        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Chart toggles remembered between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPreferences {
    pub granularity: Granularity,
    pub show_forecast: bool,
    pub show_confidence: bool,
}

impl Default for ChartPreferences {
    fn default() -> Self {
        Self {
            granularity: Granularity::Week,
            show_forecast: true,
            show_confidence: true,
        }
    }
}

impl ChartPreferences {
    /// Load preferences, falling back to defaults when absent or malformed
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(value) = store.get(PREFERENCES_KEY)? else {
            return Ok(Self::default());
        };

        match serde_json::from_value(value) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed chart preferences");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(PREFERENCES_KEY, serde_json::to_value(self)?)
    }
}

/// Remember the most recent assistant answer
pub fn save_last_answer(store: &dyn KeyValueStore, answer: &str) -> Result<()> {
    store.set(LAST_ANSWER_KEY, Value::String(answer.to_string()))
}

/// The most recent assistant answer, if any
pub fn last_answer(store: &dyn KeyValueStore) -> Result<Option<String>> {
    Ok(store
        .get(LAST_ANSWER_KEY)?
        .and_then(|v| v.as_str().map(str::to_string)))
}
