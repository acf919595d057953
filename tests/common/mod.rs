//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;
use todos::store::{DocStore, FileStore};

pub const NOTES: &str = "notes";
pub const TODOS: &str = "todos";

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

/// Builder for a file-backed store populated with notes and tasks
///
/// Records are written through [`FileStore`], so the on-disk layout is the
/// real one. Versions are explicit to keep sort order predictable.
pub struct StoreBuilder {
    temp_dir: TempDir,
    store: FileStore,
}

impl StoreBuilder {
    /// Create a new builder over an empty store directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(&temp_dir.path().join("store")).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Root of the store (`store_dir` in the config)
    pub fn store_dir(&self) -> PathBuf {
        self.temp_dir.path().join("store")
    }

    /// Temp directory holding the store; usable as a fake `HOME`
    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a note without a title
    pub fn with_note(self, id: &str, version: u64, content: &str) -> Self {
        self.with_record(NOTES, id, version, json!({ "content": content }))
    }

    /// Add a note with a title
    pub fn with_titled_note(self, id: &str, version: u64, title: &str, content: &str) -> Self {
        self.with_record(NOTES, id, version, json!({ "title": title, "content": content }))
    }

    /// Add a task record
    pub fn with_task(self, id: &str, version: u64, action: &str, done: bool) -> Self {
        self.with_record(TODOS, id, version, json!({ "action": action, "done": done }))
    }

    /// Add an arbitrary revision
    pub fn with_record(mut self, collection: &str, id: &str, version: u64, value: Value) -> Self {
        self.store
            .put_revision(collection, id, &version.to_string(), fields(value))
            .expect("Failed to write record");
        self
    }

    /// Write `~/.config/todos.toml` under the fake home, pointing at the store
    pub fn with_config(self, extra: &str) -> Self {
        let config_dir = self.home().join(".config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        let content = format!("store_dir = {:?}\n{}", self.store_dir().display().to_string(), extra);
        fs::write(config_dir.join("todos.toml"), content).expect("Failed to write config");
        self
    }

    /// Reopen the store from disk
    pub fn reopen(&self) -> FileStore {
        FileStore::open(&self.store_dir()).expect("Failed to reopen store")
    }

    /// The store as written so far
    pub fn store(&mut self) -> &mut FileStore {
        &mut self.store
    }

    /// Build and return the temp directory and store (consumes self)
    pub fn build(self) -> (TempDir, FileStore) {
        (self.temp_dir, self.store)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Content of a note as currently on disk
pub fn note_content(store: &impl DocStore, id: &str) -> String {
    store
        .get_by_id(NOTES, id)
        .expect("note exists")
        .get_str("content")
        .expect("note has content")
        .to_string()
}
