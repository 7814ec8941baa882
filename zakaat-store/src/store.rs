//! File-backed record store.
//!
//! # Layout
//! - One JSON file per collection: `<root>/zakaat_<collection>.json`.
//! - Each file is an object mapping record key to record body.
//!
//! # Invariants
//! - A put or delete rewrites the whole collection through a temp file that is
//!   fsynced and renamed into place; readers see the old or the new file, never a mix.
//! - A missing collection file reads as an empty collection.
//! - An unreadable or malformed file is reported, never treated as empty.
//! - Collections are independent files; a bad file only affects its own collection.

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};

/// Saved calculations
pub const HISTORY: &str = "history";
/// Recurring reminders
pub const REMINDERS: &str = "reminders";

const FILE_PREFIX: &str = "zakaat_";

static COLLECTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("static collection pattern"));

type Records = BTreeMap<String, Value>;

/// Durable key -> record mapping, scoped by collection.
///
/// Holds only its root directory; every call reads the current file, so edits
/// made by another handle (or by hand) are picked up.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Write {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Backing file of a collection
    pub fn collection_path(&self, collection: &str) -> StoreResult<PathBuf> {
        if !COLLECTION_NAME.is_match(collection) {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        Ok(self.root.join(format!("{FILE_PREFIX}{collection}.json")))
    }

    /// Insert or overwrite `key`. Returns once the collection is on disk.
    pub fn put<T: Serialize>(&self, collection: &str, key: &str, record: &T) -> StoreResult<()> {
        validate_key(key)?;
        let path = self.collection_path(collection)?;
        let value = serde_json::to_value(record)?;

        let mut records = load(&path)?;
        let replaced = records.insert(key.to_string(), value).is_some();
        persist(&path, &records)?;

        tracing::debug!(collection, key, replaced, "record stored");
        Ok(())
    }

    /// Fetch and decode one record; `None` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, collection: &str, key: &str) -> StoreResult<Option<T>> {
        let path = self.collection_path(collection)?;
        let mut records = load(&path)?;
        records
            .remove(key)
            .map(|value| decode(collection, key, value))
            .transpose()
    }

    /// Keys in a collection; empty when it was never written.
    pub fn list_keys(&self, collection: &str) -> StoreResult<BTreeSet<String>> {
        let path = self.collection_path(collection)?;
        Ok(load(&path)?.into_keys().collect())
    }

    /// All records of a collection in key order.
    pub fn entries<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<(String, T)>> {
        let path = self.collection_path(collection)?;
        load(&path)?
            .into_iter()
            .map(|(key, value)| {
                let record = decode(collection, &key, value)?;
                Ok((key, record))
            })
            .collect()
    }

    /// Remove `key`. Idempotent: returns `false` (and writes nothing) when it was absent.
    pub fn delete(&self, collection: &str, key: &str) -> StoreResult<bool> {
        let path = self.collection_path(collection)?;
        let mut records = load(&path)?;
        if records.remove(key).is_none() {
            tracing::debug!(collection, key, "delete of absent record");
            return Ok(false);
        }
        persist(&path, &records)?;

        tracing::debug!(collection, key, "record deleted");
        Ok(true)
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(collection: &str, key: &str, value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|source| StoreError::Decode {
        collection: collection.to_string(),
        key: key.to_string(),
        source,
    })
}

fn load(path: &Path) -> StoreResult<Records> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Records::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if text.trim().is_empty() {
        return Ok(Records::new());
    }

    serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn persist(path: &Path, records: &Records) -> StoreResult<()> {
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = serde_json::to_vec_pretty(records)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_validated() {
        let store = RecordStore {
            root: PathBuf::from("/tmp/unused"),
        };
        assert!(store.collection_path(HISTORY).is_ok());
        assert!(store.collection_path("custom_2").is_ok());
        for bad in ["", "History", "../etc", "a b", "9lives"] {
            assert!(matches!(
                store.collection_path(bad),
                Err(StoreError::InvalidCollection(_))
            ));
        }
    }

    #[test]
    fn collection_file_names() {
        let store = RecordStore {
            root: PathBuf::from("/data"),
        };
        assert_eq!(
            store.collection_path(HISTORY).unwrap(),
            PathBuf::from("/data/zakaat_history.json")
        );
        assert_eq!(
            store.collection_path(REMINDERS).unwrap(),
            PathBuf::from("/data/zakaat_reminders.json")
        );
    }

    #[test]
    fn blank_keys_rejected() {
        assert!(validate_key("").is_err());
        assert!(validate_key("  ").is_err());
        assert!(validate_key("calc_1").is_ok());
    }
}
