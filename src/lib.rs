//! todos - One to-do list over Markdown notes and task records
//!
//! This library aggregates to-do items from two collections of a document
//! store:
//!
//! - Unchecked Markdown checkboxes (`[ ]`) on the lines of notes
//! - Task records whose `done` field is `false`
//!
//! Items are sorted by priority (`p:H`, `p:M`) and recency, addressed by a
//! short id, filtered by text, and marked done back in their source.
//!
//! # Example
//!
//! ```
//! use serde_json::{Map, Value};
//! use todos::store::{DocStore, MemoryStore};
//! use todos::{Config, build_todo_list};
//!
//! let mut store = MemoryStore::new();
//! let mut note = Map::new();
//! note.insert("content".into(), Value::from("intro\n- [ ] p:H buy milk\nend"));
//! store.insert("notes", note)?;
//!
//! let todos = build_todo_list(&store, &Config::new("/unused"), "")?;
//! assert_eq!(todos[0].plain_text(), "buy milk");
//! assert_eq!(todos[0].priority(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod filters;
pub mod identity;
pub mod indexer;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use completion::{Completion, mark_done};
pub use config::{Config, LineEnding};
pub use filters::{filter_todos, select_todo};
pub use identity::short_id;
pub use indexer::build_todo_list;
pub use models::{Payload, RawItem, TodoItem};
pub use store::{DocStore, FileStore, MemoryStore, Record, StoreError};
