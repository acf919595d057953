//! Data models for aggregated to-do items.
//!
//! - [`RawItem`] - A to-do freshly extracted from a note line or a task record
//! - [`Payload`] - The two kinds of source an item can come from
//! - [`TodoItem`] - The user-facing view: short id, display text, priority, date
//!
//! Field names of the underlying store records live in [`fields`].

pub mod fields;
pub mod raw;
pub mod todo;

pub use raw::{Payload, RawItem};
pub use todo::{PRIORITY_HIGH, PRIORITY_MEDIUM, PRIORITY_NONE, TodoItem, priority_of};
