use serde::{Deserialize, Serialize};

/// What an extracted to-do points back to.
///
/// The variant is the only discriminator between note-origin and task-origin
/// items; nothing downstream inspects a separate type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// A checkbox line inside a note document.
    NoteLine {
        /// The original line, including the checkbox marker and any priority tag
        text: String,
        /// 1-based position of the line within the document
        line_number: usize,
        note_title: Option<String>,
    },
    /// A record of the tasks collection.
    TaskRecord { text: String },
}

impl Payload {
    /// Raw text the priority tags are looked up in
    pub fn text(&self) -> &str {
        match self {
            Payload::NoteLine { text, .. } | Payload::TaskRecord { text } => text,
        }
    }

    pub fn line_number(&self) -> Option<usize> {
        match self {
            Payload::NoteLine { line_number, .. } => Some(*line_number),
            Payload::TaskRecord { .. } => None,
        }
    }
}

/// Transient extraction result, produced fresh for every listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub source_doc_id: String,
    /// Opaque version token (nanoseconds since the epoch, zero-padded decimal)
    pub source_version: String,
    pub payload: Payload,
}

impl RawItem {
    pub fn note_line(
        doc_id: impl Into<String>,
        version: impl Into<String>,
        text: impl Into<String>,
        line_number: usize,
        note_title: Option<String>,
    ) -> Self {
        Self {
            source_doc_id: doc_id.into(),
            source_version: version.into(),
            payload: Payload::NoteLine { text: text.into(), line_number, note_title },
        }
    }

    pub fn task(
        doc_id: impl Into<String>,
        version: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_doc_id: doc_id.into(),
            source_version: version.into(),
            payload: Payload::TaskRecord { text: text.into() },
        }
    }

    pub fn line_number(&self) -> Option<usize> {
        self.payload.line_number()
    }

    pub fn is_note(&self) -> bool {
        matches!(self.payload, Payload::NoteLine { .. })
    }
}
