//! JSON-file backed document store
//!
//! Layout: `<root>/<collection>/<id>.json`, one file per record holding its
//! full revision history. The whole tree is loaded when the store is opened;
//! every write rewrites the one affected record file atomically (temp file +
//! rename).

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use super::memory::{MemoryStore, StoredRecord};
use super::{DocStore, Record, StoreError, StoreResult};

const RECORD_EXTENSION: &str = "json";

// Maximum size of a single record file: 10MB
const MAX_RECORD_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be created or walked, or if a record
    /// file is unreadable, oversized, malformed, or named after a different id.
    pub fn open(root: &Path) -> StoreResult<Self> {
        fs::create_dir_all(root)
            .map_err(|source| StoreError::Io { path: root.to_path_buf(), source })?;

        let mut inner = MemoryStore::new();
        let mut loaded = 0usize;
        for entry in WalkDir::new(root).min_depth(2).max_depth(2).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION)
            {
                continue;
            }
            let Some(collection) = path.parent().and_then(Path::file_name).and_then(|n| n.to_str())
            else {
                continue;
            };

            let stored = read_record_file(path)?;
            inner.load(collection, stored)?;
            loaded += 1;
        }

        debug!("event=store_open root={} records={}", root.display(), loaded);
        Ok(Self { root: root.to_path_buf(), inner })
    }

    /// Write a revision with an explicit id and version, then persist it
    pub fn put_revision(
        &mut self,
        collection: &str,
        id: &str,
        version: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<Record> {
        self.record_path(collection, id)?;
        let record = self.inner.put_revision(collection, id, version, fields)?;
        self.persist(collection, id)?;
        Ok(record)
    }

    fn record_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        validate_name("collection", collection)?;
        validate_name("record id", id)?;
        Ok(self.root.join(collection).join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    fn persist(&self, collection: &str, id: &str) -> StoreResult<()> {
        let stored = self.inner.stored(collection, id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        let path = self.record_path(collection, id)?;
        let dir = self.root.join(collection);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;

        let json = serde_json::to_string_pretty(stored)
            .map_err(|source| StoreError::Serde { path: path.clone(), source })?;
        let temp = dir.join(format!(".{}.{}.tmp", id, RECORD_EXTENSION));
        fs::write(&temp, json).map_err(|source| StoreError::Io { path: temp.clone(), source })?;
        fs::rename(&temp, &path).map_err(|source| StoreError::Io { path: path.clone(), source })?;

        debug!("event=store_write collection={} id={}", collection, id);
        Ok(())
    }
}

impl DocStore for FileStore {
    fn scan(&self, collection: &str, as_of: &str) -> StoreResult<Vec<Record>> {
        self.inner.scan(collection, as_of)
    }

    fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Record> {
        self.inner.get_by_id(collection, id)
    }

    fn update(&mut self, collection: &str, record: &Record) -> StoreResult<Record> {
        self.record_path(collection, &record.id)?;
        let updated = self.inner.update(collection, record)?;
        self.persist(collection, &record.id)?;
        Ok(updated)
    }

    fn insert(&mut self, collection: &str, fields: Map<String, Value>) -> StoreResult<Record> {
        validate_name("collection", collection)?;
        let inserted = self.inner.insert(collection, fields)?;
        self.persist(collection, &inserted.id)?;
        Ok(inserted)
    }
}

fn read_record_file(path: &Path) -> StoreResult<StoredRecord> {
    let metadata =
        fs::metadata(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    if metadata.len() > MAX_RECORD_FILE_BYTES {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "file is {} bytes, limit is {} bytes",
                metadata.len(),
                MAX_RECORD_FILE_BYTES
            ),
        });
    }

    let json = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    let stored: StoredRecord = serde_json::from_str(&json)
        .map_err(|source| StoreError::Serde { path: path.to_path_buf(), source })?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if stem != stored.id {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("file holds record {:?}", stored.id),
        });
    }
    Ok(stored)
}

/// Names become path components, so they must stay inside their directory
fn validate_name(kind: &'static str, name: &str) -> StoreResult<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidName { kind, name: name.to_string() });
    }
    Ok(())
}
