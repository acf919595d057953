//! Extraction of to-do candidates from note text
//!
//! A note line is a to-do when it holds an unchecked Markdown checkbox (`[ ]`).
//! Scanning is pure and never fails: a note without content simply has no
//! to-dos.

pub mod checkbox;

pub use checkbox::{CHECKED, UNCHECKED, scan_document, scan_record};
