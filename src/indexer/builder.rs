//! Aggregation of note to-dos and open tasks into one ordered list.
//!
//! # Ordering
//!
//! Items are sorted descending by `(priority, version)`:
//!
//! - Higher priority first (`p:H` = 3, `p:M` = 2, untagged = 1)
//! - Within a priority, the most recent source version first
//!
//! Versions are compared as raw tokens. Store versions are zero-padded
//! decimal nanoseconds, so string order is numeric order. The sort is stable:
//! ties keep extraction order (notes by document id and line, then tasks), but
//! callers should not depend on it.
//!
//! # Error Handling Strategy
//!
//! Unlike a best-effort index, nothing here is skipped on failure: a store
//! error during extraction or task loading aborts the whole listing. The only
//! tolerated oddities are per-item (missing note content, missing task action,
//! unparsable version), which degrade to empty output for that item.

use anyhow::Result;

use super::extractor::{ExtractedNotes, extract_note_todos, flatten_notes};
use super::tasks::load_open_tasks;
use crate::config::Config;
use crate::models::{RawItem, TodoItem};
use crate::store::DocStore;

/// Build the full, sorted to-do list from notes and tasks
///
/// # Arguments
///
/// * `store` - Document store holding both collections
/// * `config` - Names of the notes and tasks collections
/// * `as_of` - Snapshot token; empty for the latest state
///
/// # Errors
///
/// Returns an error if either collection cannot be read or the snapshot token
/// is invalid.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, Value};
/// use todos::config::Config;
/// use todos::indexer::build_todo_list;
/// use todos::store::{DocStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// let mut task = Map::new();
/// task.insert("action".into(), Value::from("buy eggs"));
/// task.insert("done".into(), Value::from(false));
/// store.insert("todos", task)?;
///
/// let todos = build_todo_list(&store, &Config::new("/unused"), "")?;
/// assert_eq!(todos.len(), 1);
/// assert_eq!(todos[0].todo(), "buy eggs");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_todo_list<S: DocStore>(
    store: &S,
    config: &Config,
    as_of: &str,
) -> Result<Vec<TodoItem>> {
    let notes = extract_note_todos(store, &config.notes_col, as_of)?;
    let tasks = load_open_tasks(store, &config.todos_col, as_of)?;

    let mut todos = merge(notes, tasks);
    sort_todos(&mut todos);
    Ok(todos)
}

/// Merge extracted notes and open tasks, notes first, without sorting
pub fn merge(notes: ExtractedNotes, tasks: Vec<RawItem>) -> Vec<TodoItem> {
    flatten_notes(notes).into_iter().chain(tasks).map(TodoItem::new).collect()
}

/// Sort by priority, then by version, both descending
pub fn sort_todos(todos: &mut [TodoItem]) {
    todos.sort_by(|a, b| {
        (b.priority(), &b.raw.source_version).cmp(&(a.priority(), &a.raw.source_version))
    });
}
