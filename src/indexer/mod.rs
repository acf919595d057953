//! Building the aggregated to-do list
//!
//! - [`extractor`] - Scan-and-group of checkbox lines over the notes collection
//! - [`tasks`] - Open records of the tasks collection
//! - [`builder`] - Merge of both sources into one list, sorted by priority and recency

pub mod builder;
pub mod extractor;
pub mod tasks;

pub use builder::{build_todo_list, sort_todos};
pub use extractor::{ExtractedNote, ExtractedNotes, extract_note_todos};
pub use tasks::load_open_tasks;
