//! Marking to-do items done in their source.
//!
//! - Note line: the first `[ ]` of that one line becomes `[x]` and the note is
//!   written back; every other line is left as it was
//! - Task: the record's `done` field is set to `true`; every other field is
//!   left as it was
//!
//! Items are computed from a listing that may be stale by the time the user
//! acts on it. When the target is already done (or the line is gone) nothing
//! is written and [`Completion::AlreadyDone`] is returned: a repeated `done`
//! is a no-op, not an error. No concurrency check is made beyond what the
//! store offers.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::{Config, LineEnding};
use crate::models::fields::{CONTENT_FIELD, DONE_FIELD};
use crate::models::{Payload, TodoItem};
use crate::parsers::{CHECKED, UNCHECKED};
use crate::store::DocStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The source was updated
    Completed,
    /// Nothing left to do; the source was not touched
    AlreadyDone,
}

/// Mark a to-do item done in the note or task record it came from
///
/// # Errors
///
/// Returns an error if the source record cannot be fetched (including when it
/// no longer exists) or the update fails.
pub fn mark_done<S: DocStore>(
    store: &mut S,
    config: &Config,
    todo: &TodoItem,
) -> Result<Completion> {
    match &todo.raw.payload {
        Payload::NoteLine { line_number, .. } => complete_note_line(
            store,
            &config.notes_col,
            todo.doc_id(),
            *line_number,
            config.line_ending,
        ),
        Payload::TaskRecord { .. } => complete_task(store, &config.todos_col, todo.doc_id()),
    }
}

fn complete_note_line<S: DocStore>(
    store: &mut S,
    collection: &str,
    doc_id: &str,
    line_number: usize,
    line_ending: LineEnding,
) -> Result<Completion> {
    let mut note = store
        .get_by_id(collection, doc_id)
        .with_context(|| format!("Failed to fetch note {}", doc_id))?;

    let Some(updated) =
        note.get_str(CONTENT_FIELD).and_then(|c| check_line(c, line_number, line_ending))
    else {
        warn!("event=stale_todo kind=note doc_id={} line={}", doc_id, line_number);
        return Ok(Completion::AlreadyDone);
    };

    note.set(CONTENT_FIELD, updated);
    store.update(collection, &note).with_context(|| format!("Failed to update note {}", doc_id))?;
    debug!("event=todo_done kind=note doc_id={} line={}", doc_id, line_number);
    Ok(Completion::Completed)
}

fn complete_task<S: DocStore>(store: &mut S, collection: &str, id: &str) -> Result<Completion> {
    let mut task =
        store.get_by_id(collection, id).with_context(|| format!("Failed to fetch task {}", id))?;

    if task.get_bool(DONE_FIELD) == Some(true) {
        warn!("event=stale_todo kind=task id={}", id);
        return Ok(Completion::AlreadyDone);
    }

    task.set(DONE_FIELD, true);
    store.update(collection, &task).with_context(|| format!("Failed to update task {}", id))?;
    debug!("event=todo_done kind=task id={}", id);
    Ok(Completion::Completed)
}

/// Check the box on one line of a note
///
/// Returns the rewritten content, or `None` when the line does not exist or
/// holds no unchecked box. Lines are split like the scanner splits them and
/// rejoined with the separator `line_ending` picks for this content.
///
/// # Examples
///
/// ```
/// use todos::completion::check_line;
/// use todos::config::LineEnding;
///
/// let content = "intro\n- [ ] buy milk\nend";
/// assert_eq!(
///     check_line(content, 2, LineEnding::Preserve).as_deref(),
///     Some("intro\n- [x] buy milk\nend")
/// );
/// ```
pub fn check_line(content: &str, line_number: usize, line_ending: LineEnding) -> Option<String> {
    let target = line_number.checked_sub(1)?;
    let lines: Vec<&str> = content.lines().collect();
    let line = lines.get(target)?;
    if !line.contains(UNCHECKED) {
        return None;
    }
    let checked = line.replacen(UNCHECKED, CHECKED, 1);

    let separator = line_ending.separator_for(content);
    let mut result = String::with_capacity(content.len() + separator.len());
    for (idx, current) in lines.iter().enumerate() {
        if idx > 0 {
            result.push_str(separator);
        }
        result.push_str(if idx == target { &checked } else { current });
    }
    if line_ending.keeps_trailing_break() && content.ends_with('\n') {
        result.push_str(separator);
    }
    Some(result)
}
