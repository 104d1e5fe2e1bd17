//! The directory-backed store callers touch directly.

use std::fs;
use std::path::{Path, PathBuf};

use rho_types::Value;

use crate::error::{StoreError, StoreResult};
use crate::key::validate_key;
use crate::record::Record;
use crate::registry::CodecRegistry;

/// Well-known store directory name under the caller's working directory.
pub const STORE_DIR_NAME: &str = ".rho-data";

/// A directory of saved values, one file per key.
///
/// The store owns no state beyond its root path and an immutable
/// [`CodecRegistry`]; every operation is a plain synchronous filesystem
/// round trip. The directory is created lazily on first save and never
/// removed. No locking is performed: the directory is assumed to belong to
/// the calling process while an operation runs, and concurrent writers of
/// the same key race with last-writer-wins (each write is still atomic via
/// rename, so readers never see a torn record).
#[derive(Debug)]
pub struct DataStore {
    root: PathBuf,
    registry: CodecRegistry,
}

impl DataStore {
    /// A store rooted at `root`, negotiating codecs from this build.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registry: CodecRegistry::detect(),
        }
    }

    /// A store with an explicitly constructed registry (tests force or
    /// restrict the codec set this way).
    pub fn with_registry(root: impl Into<PathBuf>, registry: CodecRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// The conventional store for the current working directory:
    /// `./.rho-data`.
    pub fn in_current_dir() -> StoreResult<Self> {
        Ok(Self::open(std::env::current_dir()?.join(STORE_DIR_NAME)))
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The codec registry this store writes and reads with.
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Persist `value` under `name`, fully replacing any previous record.
    ///
    /// The record is written to a dot-prefixed temporary in the store
    /// directory and renamed into place, so an interrupted save leaves the
    /// previous record intact rather than a half-written file.
    pub fn save(&self, value: &Value, name: &str) -> StoreResult<()> {
        validate_key(name)?;
        fs::create_dir_all(&self.root)?;

        let (tag, plain) = rho_codec::encode(value);
        let compression = self.registry.active();
        let payload = self.registry.compress(compression, &plain)?;
        let record = Record {
            tag,
            compression,
            payload,
        };

        // Valid keys never start with '.', so the temporary cannot collide
        // with another key.
        let tmp = self.root.join(format!(".{name}.tmp"));
        let dest = self.root.join(name);
        fs::write(&tmp, record.to_bytes())?;
        if let Err(e) = fs::rename(&tmp, &dest) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(
            name,
            tag = %tag,
            compression = %compression,
            "saved value"
        );
        Ok(())
    }

    /// Load the value saved under `name`.
    pub fn load(&self, name: &str) -> StoreResult<Value> {
        validate_key(name)?;
        if !self.root.is_dir() {
            return Err(StoreError::StoreNotFound(self.root.clone()));
        }
        let path = self.root.join(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::KeyNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let record = Record::from_bytes(&bytes)?;
        let plain = self.registry.decompress(record.compression, &record.payload)?;
        let value = rho_codec::decode(record.tag, &plain)?;

        tracing::debug!(name, tag = %record.tag, "loaded value");
        Ok(value)
    }

    /// Sorted list of all saved keys. Empty when the store directory does
    /// not exist yet.
    pub fn list(&self) -> StoreResult<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            // Skip temporaries and anything else the store did not put here
            // as a key.
            if validate_key(name).is_ok() && entry.file_type()?.is_file() {
                keys.push(name.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Returns `true` if a record exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        validate_key(name).is_ok() && self.root.join(name).is_file()
    }

    /// Delete the record under `name`.
    pub fn remove(&self, name: &str) -> StoreResult<()> {
        validate_key(name)?;
        if !self.root.is_dir() {
            return Err(StoreError::StoreNotFound(self.root.clone()));
        }
        match fs::remove_file(self.root.join(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::KeyNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
