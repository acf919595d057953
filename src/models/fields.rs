//! Field names shared by note documents and task records.

/// Full Markdown body of a note document.
pub const CONTENT_FIELD: &str = "content";

/// Optional display title of a note document.
pub const TITLE_FIELD: &str = "title";

/// Action text of a task record.
pub const ACTION_FIELD: &str = "action";

/// Completion flag of a task record.
pub const DONE_FIELD: &str = "done";
