//! Flat-file document store
//!
//! Every piece of bot state lives in its own small file: JSON documents for the
//! suggestion cache and role lists, newline-delimited text for the catalog.
//! Reads never fail (missing or malformed files load as empty), writes surface
//! I/O errors to the caller.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add `DocumentStore` trait with in-memory implementation for tests
//! - 1.0.0: Initial release with JSON and line document helpers

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Raw read/write access to named documents.
///
/// Implementations assume a single writer. Nothing here locks.
pub trait DocumentStore: Send + Sync {
    /// Read the document, `Ok(None)` when it does not exist
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the document with `contents`, creating parent directories
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Append `contents` to the document, creating it if needed
    fn append(&self, path: &Path, contents: &str) -> Result<()>;

    /// Delete the document. Deleting a missing document is not an error.
    fn remove(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Shared handle passed to every manager
pub type SharedStore = Arc<dyn DocumentStore>;

// ============================================================================
// Filesystem
// ============================================================================

/// Store backed by the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        FileStore
    }

    pub fn shared() -> SharedStore {
        Arc::new(FileStore)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Sibling temp file named after the full file name (`foods.txt.tmp`)
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write to a sibling temp file, then rename over the target
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write {}", tmp.display()))?;

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

impl DocumentStore for FileStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        ensure_parent(path)?;
        write_atomic(path, contents)
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        use std::io::Write;

        ensure_parent(path)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for append", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to append to {}", path.display()))?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Store that keeps documents in a map; used by tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<MemoryStore> {
        Arc::new(Self::new())
    }

    fn documents(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        // A poisoned map still holds consistent strings
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.documents().get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.documents()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, contents: &str) -> Result<()> {
        self.documents()
            .entry(path.to_path_buf())
            .or_default()
            .push_str(contents);
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.documents().remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.documents().contains_key(path)
    }
}

// ============================================================================
// Document helpers
// ============================================================================

/// Load a JSON document, falling back to `T::default()` when it is missing,
/// unreadable or malformed.
pub fn load_json<T>(store: &dyn DocumentStore, path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match store.read(path) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            debug!("{} does not exist yet, using empty default", path.display());
            return T::default();
        }
        Err(e) => {
            warn!("Could not read {}: {e:#}", path.display());
            return T::default();
        }
    };

    if contents.trim().is_empty() {
        return T::default();
    }

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed JSON in {}: {e}", path.display());
            T::default()
        }
    }
}

/// Save a JSON document pretty-printed with a trailing newline
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn DocumentStore,
    path: &Path,
    value: &T,
) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    contents.push('\n');
    store.write(path, &contents)
}

/// Split raw text into trimmed, non-empty lines
pub fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a newline-delimited document. Missing or unreadable files load as empty.
pub fn load_lines(store: &dyn DocumentStore, path: &Path) -> Vec<String> {
    match store.read(path) {
        Ok(Some(contents)) => parse_lines(&contents),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Could not read {}: {e:#}", path.display());
            Vec::new()
        }
    }
}

/// Replace a newline-delimited document with `lines`
pub fn save_lines(store: &dyn DocumentStore, path: &Path, lines: &[String]) -> Result<()> {
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    store.write(path, &contents)
}

/// Append a single line, keeping the previous last line intact
pub fn append_line(store: &dyn DocumentStore, path: &Path, line: &str) -> Result<()> {
    let needs_separator = match store.read(path)? {
        Some(existing) => !existing.is_empty() && !existing.ends_with('\n'),
        None => false,
    };

    let mut contents = String::with_capacity(line.len() + 2);
    if needs_separator {
        contents.push('\n');
    }
    contents.push_str(line);
    contents.push('\n');
    store.append(path, &contents)
}
