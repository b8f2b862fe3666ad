//! Durable key-value storage backing the session.
//!
//! The session store doesn't care where its three entries live. It only
//! needs something implementing [`KeyValueStore`]:
//! - [`MemoryStore`] for tests and throwaway clients
//! - [`FileStore`] to survive restarts (a small JSON file)
//!
//! Writes come in batches, and a batch either lands completely or not at
//! all. That is what keeps a half-written session from ever being read
//! back.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::StorageError;

/// A string-to-string store with atomic batch writes.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the store is owned by the session store,
///   which the client shares across tasks behind a mutex.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes every entry, or none of them.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the batch could not be persisted. The
    /// store's contents are then unchanged.
    fn put_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Removes every key, or none of them. Missing keys are not an error.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the removal could not be persisted.
    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// An in-process [`KeyValueStore`]. Never fails, forgets everything on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A [`KeyValueStore`] persisted as a JSON object in a single file.
///
/// Each batch is written to a sibling `.tmp` file which is then renamed
/// over the real one, so a crash mid-write leaves the previous contents
/// intact. The in-memory copy is only updated after the rename succeeds.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens (or lazily creates) the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    ///
    /// # Errors
    /// - [`StorageError::Io`] if the file exists but can't be read
    /// - [`StorageError::Corrupt`] if it isn't a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                StorageError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "file store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `session.json` → `session.json.tmp`. Keeping the full file name means
    /// stores that differ only by extension never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, next: &HashMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(next).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}
