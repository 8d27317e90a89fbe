// Key-value store backends
use crate::application::ports::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Process-local store; contents are lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lookup(entries: &BTreeMap<String, String>, keys: &[&str]) -> Vec<Option<String>> {
    keys.iter().map(|key| entries.get(*key).cloned()).collect()
}

impl KeyValueStore for MemoryStore {
    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        lookup(&entries, keys)
    }

    fn set_many(&self, updates: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in updates {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Flat JSON object on disk, cached in memory. Every write rewrites the file
/// through a temporary sibling and a rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// or corrupt one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Could not read settings file {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, serialized)
            .and_then(|()| std::fs::rename(&tmp, &self.path));

        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        lookup(&entries, keys)
    }

    fn set_many(&self, updates: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut updated = entries.clone();
        for (key, value) in updates {
            updated.insert(key.to_string(), value.to_string());
        }

        if let Err(e) = self.write_entries(&updated) {
            tracing::error!("Failed to persist settings to {}: {}", self.path.display(), e);
            return Err(e);
        }
        *entries = updated;
        Ok(())
    }
}
