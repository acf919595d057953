//! Document store interface
//!
//! The aggregation core never talks to storage directly. It goes through
//! [`DocStore`], which models a versioned document collection store:
//!
//! - Every write creates a new revision with a fresh, increasing version token
//! - Reads may be bounded to a snapshot (`as_of`); the empty token means latest
//! - Updates replace the whole record (last write wins)
//!
//! Two implementations ship with the crate: [`MemoryStore`] keeps everything in
//! process and [`FileStore`] persists the same state as JSON files on disk.

pub mod error;
pub mod file;
pub mod memory;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::models::fields::DONE_FIELD;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Width of a zero-padded version token; keeps string order equal to numeric order
pub const VERSION_WIDTH: usize = 19;

/// Largest version that still fits in [`VERSION_WIDTH`] digits
pub const MAX_VERSION: u64 = 9_999_999_999_999_999_999;

/// A record as seen at one revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub version: String,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }
}

/// Format a numeric version as a store token
pub fn format_version(nanos: u64) -> String {
    format!("{:0width$}", nanos, width = VERSION_WIDTH)
}

/// Parse a stored version token, rejecting values wider than [`VERSION_WIDTH`]
pub fn parse_version_token(token: &str) -> StoreResult<u64> {
    match token.trim().parse::<u64>() {
        Ok(numeric) if numeric <= MAX_VERSION => Ok(numeric),
        _ => Err(StoreError::InvalidVersion(token.to_string())),
    }
}

/// Parse a snapshot token; the empty token means "latest"
pub fn parse_snapshot(as_of: &str) -> StoreResult<Option<u64>> {
    let as_of = as_of.trim();
    if as_of.is_empty() {
        return Ok(None);
    }
    as_of.parse::<u64>().map(Some).map_err(|_| StoreError::InvalidSnapshot(as_of.to_string()))
}

/// Versioned document collections
///
/// `scan`, `get_by_id`, `update` and `insert` are the primitives a backend
/// provides. `query_not_done` and `batch_extract` are built on `scan`; a remote
/// backend may override them to push the work to the server.
pub trait DocStore {
    /// All records of a collection as of the snapshot, in id order
    ///
    /// Unknown collections are empty.
    fn scan(&self, collection: &str, as_of: &str) -> StoreResult<Vec<Record>>;

    /// Latest revision of a record; fails with [`StoreError::NotFound`] when absent
    fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Record>;

    /// Replace a record, keyed by `record.id`, and return the new revision
    fn update(&mut self, collection: &str, record: &Record) -> StoreResult<Record>;

    /// Create a record, returning it with its assigned id and version
    fn insert(&mut self, collection: &str, fields: Map<String, Value>) -> StoreResult<Record>;

    /// Records whose `done` field is `false`
    ///
    /// Records without a boolean `done` field are not matched.
    fn query_not_done(&self, collection: &str, as_of: &str) -> StoreResult<Vec<Record>> {
        Ok(self
            .scan(collection, as_of)?
            .into_iter()
            .filter(|r| r.get_bool(DONE_FIELD) == Some(false))
            .collect())
    }

    /// Scan-and-group over a collection
    ///
    /// `map` runs once per record (in parallel); its outputs are concatenated
    /// in record order and handed to `reduce`, so the result does not depend on
    /// scheduling.
    fn batch_extract<E, T, M, R>(
        &self,
        collection: &str,
        map: M,
        reduce: R,
        as_of: &str,
    ) -> StoreResult<T>
    where
        E: Send,
        M: Fn(&Record) -> Vec<E> + Sync + Send,
        R: FnOnce(Vec<E>) -> T,
    {
        let records = self.scan(collection, as_of)?;
        let emitted: Vec<Vec<E>> = records.par_iter().map(|record| map(record)).collect();
        Ok(reduce(emitted.into_iter().flatten().collect()))
    }
}
