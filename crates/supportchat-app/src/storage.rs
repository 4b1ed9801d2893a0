use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use supportchat_client::{SessionStore, StoreError};

/// Session store backed by a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Current contents, or an empty map if the file is unreadable garbage.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_all() {
            Err(StoreError::Corrupt(detail)) => {
                log::warn!("Discarding corrupt session store {}", detail);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read_for_update()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}
