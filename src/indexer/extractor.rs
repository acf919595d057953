//! Batch extraction of checkbox to-dos from a notes collection.
//!
//! Conceptually a map-then-group-by-key pass: the map step scans one note,
//! the reduce step groups every emitted item under its document id. Both run
//! through [`DocStore::batch_extract`], which may parallelize the map step but
//! always reduces in record order.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::debug;

use crate::models::{Payload, RawItem};
use crate::parsers::scan_record;
use crate::store::{DocStore, Record};

/// To-dos found in one note document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedNote {
    /// Payloads in line order
    pub todos: Vec<Payload>,
    pub version: String,
    pub title: Option<String>,
}

/// Extraction result keyed by document id
pub type ExtractedNotes = BTreeMap<String, ExtractedNote>;

/// Map step: every checkbox line of one note
pub fn map_document(record: &Record) -> Vec<RawItem> {
    scan_record(record)
}

/// Reduce step: group emitted items by document id, keeping their order
pub fn group_by_document(emitted: Vec<RawItem>) -> ExtractedNotes {
    let mut notes = ExtractedNotes::new();
    for item in emitted {
        let RawItem { source_doc_id, source_version, payload } = item;
        let note = notes.entry(source_doc_id).or_insert_with(|| ExtractedNote {
            todos: Vec::new(),
            version: source_version,
            title: match &payload {
                Payload::NoteLine { note_title, .. } => note_title.clone(),
                Payload::TaskRecord { .. } => None,
            },
        });
        note.todos.push(payload);
    }
    notes
}

/// Extract the to-dos of every note in `collection` as of the snapshot
///
/// Notes without to-dos are absent from the result.
///
/// # Errors
///
/// Store errors (including an invalid snapshot token) are returned as is;
/// there is no partial result.
pub fn extract_note_todos<S: DocStore>(
    store: &S,
    collection: &str,
    as_of: &str,
) -> Result<ExtractedNotes> {
    let notes = store
        .batch_extract(collection, map_document, group_by_document, as_of)
        .with_context(|| format!("Failed to extract to-dos from collection {}", collection))?;

    debug!(
        "event=notes_extracted collection={} notes={} todos={}",
        collection,
        notes.len(),
        notes.values().map(|n| n.todos.len()).sum::<usize>()
    );
    Ok(notes)
}

/// Turn grouped notes back into raw items, by document then by line
pub fn flatten_notes(notes: ExtractedNotes) -> Vec<RawItem> {
    notes
        .into_iter()
        .flat_map(|(doc_id, note)| {
            let version = note.version;
            note.todos.into_iter().map(move |payload| RawItem {
                source_doc_id: doc_id.clone(),
                source_version: version.clone(),
                payload,
            })
        })
        .collect()
}
