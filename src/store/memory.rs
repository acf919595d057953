use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{
    DocStore, MAX_VERSION, Record, StoreError, StoreResult, format_version, parse_snapshot,
    parse_version_token,
};

/// One revision of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub version: String,
    pub fields: Map<String, Value>,
}

/// A record with its full revision history, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub revisions: Vec<Revision>,
}

impl StoredRecord {
    /// The record as of `bound` (inclusive), or the latest revision when unbounded
    pub fn at(&self, bound: Option<u64>) -> Option<Record> {
        let revision = match bound {
            None => self.revisions.last(),
            Some(bound) => {
                let bound = format_version(bound.min(MAX_VERSION));
                self.revisions.iter().rev().find(|r| r.version <= bound)
            }
        }?;
        Some(Record {
            id: self.id.clone(),
            version: revision.version.clone(),
            fields: revision.fields.clone(),
        })
    }
}

/// In-process document store with revision history
///
/// Versions come from the wall clock in nanoseconds and are forced to increase
/// strictly, so two writes in the same nanosecond still get distinct versions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, BTreeMap<String, StoredRecord>>,
    last_version: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a revision with an explicit id and version
    ///
    /// Used to import existing data and to seed fixtures. The version is
    /// normalized to the zero-padded form and revisions stay ordered.
    pub fn put_revision(
        &mut self,
        collection: &str,
        id: &str,
        version: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<Record> {
        let numeric = parse_version_token(version)?;
        let version = format_version(numeric);

        let stored = self
            .collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| StoredRecord { id: id.to_string(), revisions: Vec::new() });
        stored.revisions.retain(|r| r.version != version);
        stored.revisions.push(Revision { version: version.clone(), fields: fields.clone() });
        stored.revisions.sort_by(|a, b| a.version.cmp(&b.version));

        self.last_version = self.last_version.max(numeric);
        Ok(Record { id: id.to_string(), version, fields })
    }

    /// Load a full record history, e.g. from disk
    pub fn load(&mut self, collection: &str, mut stored: StoredRecord) -> StoreResult<()> {
        for revision in &mut stored.revisions {
            let numeric = parse_version_token(&revision.version)?;
            revision.version = format_version(numeric);
            self.last_version = self.last_version.max(numeric);
        }
        stored.revisions.sort_by(|a, b| a.version.cmp(&b.version));
        self.collections.entry(collection.to_string()).or_default().insert(stored.id.clone(), stored);
        Ok(())
    }

    /// Full history of a record
    pub fn stored(&self, collection: &str, id: &str) -> Option<&StoredRecord> {
        self.collections.get(collection).and_then(|c| c.get(id))
    }

    fn next_version(&mut self) -> StoreResult<u64> {
        let now = Utc::now().timestamp_nanos_opt().map_or(0, |n| n.max(0) as u64);
        let next = self
            .last_version
            .checked_add(1)
            .filter(|v| *v <= MAX_VERSION)
            .ok_or(StoreError::VersionExhausted(self.last_version))?;
        self.last_version = now.max(next);
        Ok(self.last_version)
    }

    /// Time-ordered hex prefix followed by a random suffix
    fn new_id(&self, version: u64) -> String {
        let random = Uuid::new_v4().simple().to_string();
        format!("{:016x}{}", version, &random[..8])
    }
}

impl DocStore for MemoryStore {
    fn scan(&self, collection: &str, as_of: &str) -> StoreResult<Vec<Record>> {
        let bound = parse_snapshot(as_of)?;
        Ok(self
            .collections
            .get(collection)
            .map(|records| records.values().filter_map(|r| r.at(bound)).collect())
            .unwrap_or_default())
    }

    fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Record> {
        self.stored(collection, id).and_then(|r| r.at(None)).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    fn update(&mut self, collection: &str, record: &Record) -> StoreResult<Record> {
        if self.stored(collection, &record.id).is_none() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: record.id.clone(),
            });
        }
        let version = self.next_version()?;
        self.put_revision(collection, &record.id, &version.to_string(), record.fields.clone())
    }

    fn insert(&mut self, collection: &str, fields: Map<String, Value>) -> StoreResult<Record> {
        let version = self.next_version()?;
        let id = self.new_id(version);
        self.put_revision(collection, &id, &version.to_string(), fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_insert_assigns_id_and_version() {
        let mut store = MemoryStore::new();
        let record = store.insert("todos", fields(json!({"action": "x", "done": false}))).unwrap();

        assert_eq!(record.id.len(), 24);
        assert!(record.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(record.version.len(), 19);
        assert_eq!(store.get_by_id("todos", &record.id).unwrap(), record);
    }

    #[test]
    fn test_versions_strictly_increase() {
        let mut store = MemoryStore::new();
        let a = store.insert("c", Map::new()).unwrap();
        let b = store.insert("c", Map::new()).unwrap();
        let c = store.update("c", &a).unwrap();
        assert!(a.version < b.version);
        assert!(b.version < c.version);
    }

    #[test]
    fn test_ids_differ() {
        let mut store = MemoryStore::new();
        let a = store.insert("c", Map::new()).unwrap();
        let b = store.insert("c", Map::new()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_get_by_id_missing() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_by_id("c", "nope"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_update_missing_record() {
        let mut store = MemoryStore::new();
        let ghost = Record { id: "ghost".to_string(), version: format_version(1), fields: Map::new() };
        assert!(matches!(store.update("c", &ghost), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut store = MemoryStore::new();
        let mut record = store.insert("c", fields(json!({"done": false, "action": "a"}))).unwrap();
        record.set("done", true);
        store.update("c", &record).unwrap();

        let latest = store.get_by_id("c", &record.id).unwrap();
        assert_eq!(latest.get_bool("done"), Some(true));
        assert_eq!(latest.get_str("action"), Some("a"));
        assert_eq!(store.stored("c", &record.id).unwrap().revisions.len(), 2);
    }

    #[test]
    fn test_scan_as_of_sees_old_revision() {
        let mut store = MemoryStore::new();
        store.put_revision("c", "r1", "100", fields(json!({"done": false}))).unwrap();
        store.put_revision("c", "r1", "200", fields(json!({"done": true}))).unwrap();
        store.put_revision("c", "r2", "300", fields(json!({"done": false}))).unwrap();

        let latest = store.scan("c", "").unwrap();
        assert_eq!(latest.len(), 2);

        let old = store.scan("c", "150").unwrap();
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].get_bool("done"), Some(false));
        assert_eq!(old[0].version, format_version(100));

        assert!(store.scan("c", "50").unwrap().is_empty());
    }

    #[test]
    fn test_scan_invalid_snapshot() {
        let store = MemoryStore::new();
        assert!(matches!(store.scan("c", "abc"), Err(StoreError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_scan_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.scan("nothing", "").unwrap().is_empty());
    }

    #[test]
    fn test_query_not_done() {
        let mut store = MemoryStore::new();
        store.insert("t", fields(json!({"action": "open", "done": false}))).unwrap();
        store.insert("t", fields(json!({"action": "closed", "done": true}))).unwrap();
        store.insert("t", fields(json!({"action": "no flag"}))).unwrap();

        let open = store.query_not_done("t", "").unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].get_str("action"), Some("open"));
    }

    #[test]
    fn test_batch_extract_keeps_record_order() {
        let mut store = MemoryStore::new();
        for (id, n) in [("a", 1), ("b", 2), ("c", 3)] {
            store.put_revision("n", id, "1", fields(json!({"n": n}))).unwrap();
        }

        let emitted = store
            .batch_extract(
                "n",
                |r: &Record| vec![r.id.clone(); r.get("n").and_then(Value::as_u64).unwrap_or(0) as usize],
                |all: Vec<String>| all.join(""),
                "",
            )
            .unwrap();
        assert_eq!(emitted, "abbccc");
    }

    #[test]
    fn test_put_revision_rejects_bad_version() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.put_revision("c", "r", "v1", Map::new()),
            Err(StoreError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_put_revision_rejects_versions_wider_than_token() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.put_revision("c", "r", "10000000000000000000", Map::new()),
            Err(StoreError::InvalidVersion(_))
        ));
        assert!(matches!(
            store.put_revision("c", "r", &u64::MAX.to_string(), Map::new()),
            Err(StoreError::InvalidVersion(_))
        ));
        assert!(store.stored("c", "r").is_none());
    }

    #[test]
    fn test_largest_version_sorts_last() {
        let mut store = MemoryStore::new();
        store.put_revision("c", "older", "9000000000000000000", Map::new()).unwrap();
        store.put_revision("c", "newer", &MAX_VERSION.to_string(), Map::new()).unwrap();

        let mut versions: Vec<_> =
            store.scan("c", "").unwrap().into_iter().map(|r| r.version).collect();
        versions.sort();
        assert_eq!(versions.last().map(String::as_str), Some("9999999999999999999"));
        // A bound past the widest token still sees everything
        assert_eq!(store.scan("c", &u64::MAX.to_string()).unwrap().len(), 2);
    }

    #[test]
    fn test_exhausted_clock_is_an_error() {
        let mut store = MemoryStore::new();
        store.put_revision("c", "r", &MAX_VERSION.to_string(), Map::new()).unwrap();

        assert!(matches!(store.insert("c", Map::new()), Err(StoreError::VersionExhausted(_))));
        let record = store.get_by_id("c", "r").unwrap();
        assert!(matches!(store.update("c", &record), Err(StoreError::VersionExhausted(_))));
        assert_eq!(store.stored("c", "r").unwrap().revisions.len(), 1);
    }

    #[test]
    fn test_clock_moves_past_imported_versions() {
        let mut store = MemoryStore::new();
        let far_future = "9000000000000000000";
        store.put_revision("c", "r", far_future, Map::new()).unwrap();
        let inserted = store.insert("c", Map::new()).unwrap();
        assert!(inserted.version.as_str() > far_future);
    }
}
