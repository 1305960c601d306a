//! File-backed credential store
//!
//! Persists the session contract keys (`accessToken`, `refreshToken`,
//! `user`) as a JSON object on disk. Every write flushes the whole map so
//! the file is always a complete snapshot; a missing file is an empty
//! store, not an error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use vitaport_core::CredentialStore;
use vitaport_domain::{Result, VitaportError};

/// Credential store persisting to a JSON file
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Open (or create) the store at the given path
    ///
    /// # Errors
    /// Returns `Storage` when the file exists but cannot be read or
    /// parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                VitaportError::Storage(format!(
                    "corrupt credential file {}: {e}",
                    path.display()
                ))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(VitaportError::Storage(format!(
                    "failed to read credential file {}: {err}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "credential store opened");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    VitaportError::Storage(format!(
                        "failed to create credential directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| VitaportError::Storage(format!("failed to encode credentials: {err}")))?;
        fs::write(&self.path, raw).map_err(|err| {
            VitaportError::Storage(format!(
                "failed to write credential file {}: {err}",
                self.path.display()
            ))
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.remove(key);
        self.persist(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.clear();
        self.persist(&entries)
    }
}
