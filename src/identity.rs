//! Short, prefix-typeable ids for to-do items.
//!
//! Store ids end in a random suffix, so the id is built from the last few
//! characters and then reversed: the most varied characters come first and a
//! one or two character prefix is usually enough to pick an item.
//!
//! This is best-effort disambiguation. Two items may share an id or a prefix;
//! uniqueness is never checked. Lookups resolve collisions by taking the first
//! match in list order (see [`crate::filters::select_todo`]).

use crate::models::{Payload, RawItem};

const NOTE_SUFFIX_CHARS: usize = 5;
const TASK_SUFFIX_CHARS: usize = 6;

/// Derive the short id of an item
///
/// - Note line: last 5 characters of the document id, followed by the line
///   number, reversed
/// - Task: last 6 characters of the record id, reversed
///
/// # Examples
///
/// ```
/// use todos::identity::short_id;
/// use todos::models::RawItem;
///
/// let note = RawItem::note_line("abc12xyz99", "1", "- [ ] buy milk", 2, None);
/// assert_eq!(short_id(&note), "299zyx");
///
/// let task = RawItem::task("abc12xyz99", "1", "buy eggs");
/// assert_eq!(short_id(&task), "99zyx2");
/// ```
pub fn short_id(raw: &RawItem) -> String {
    match &raw.payload {
        Payload::NoteLine { line_number, .. } => {
            let mut id = last_chars(&raw.source_doc_id, NOTE_SUFFIX_CHARS).to_string();
            id.push_str(&line_number.to_string());
            id.chars().rev().collect()
        }
        Payload::TaskRecord { .. } => {
            last_chars(&raw.source_doc_id, TASK_SUFFIX_CHARS).chars().rev().collect()
        }
    }
}

/// Last `n` characters of `s`, or all of it when shorter
fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((start, _)) => &s[start..],
        None => s,
    }
}
