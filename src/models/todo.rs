use chrono::{DateTime, Datelike, Local, Utc};
use log::warn;

use super::raw::{Payload, RawItem};
use crate::identity::short_id;
use crate::parsers::checkbox::UNCHECKED;
use crate::utils::terminal::{red, strip_ansi_codes, yellow};
use crate::utils::timestamps::{format_todo_date, parse_version};

pub const HIGH_PRIORITY_TAG: &str = "p:H";
pub const MEDIUM_PRIORITY_TAG: &str = "p:M";

pub const PRIORITY_HIGH: u8 = 3;
pub const PRIORITY_MEDIUM: u8 = 2;
pub const PRIORITY_NONE: u8 = 1;

const NOTE_TAG: &str = "[note]";
const CLI_TAG: &str = "[cli]";
const MAX_TITLE_CHARS: usize = 15;
const SHORT_TITLE_CHARS: usize = 12;

/// Priority rank of a raw to-do text: `p:H` wins over `p:M`
pub fn priority_of(text: &str) -> u8 {
    if text.contains(HIGH_PRIORITY_TAG) {
        PRIORITY_HIGH
    } else if text.contains(MEDIUM_PRIORITY_TAG) {
        PRIORITY_MEDIUM
    } else {
        PRIORITY_NONE
    }
}

/// User-facing view over a [`RawItem`]
///
/// Every accessor is a pure projection of the raw item; nothing is cached
/// besides the short id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub raw: RawItem,
}

impl TodoItem {
    pub fn new(raw: RawItem) -> Self {
        Self { id: short_id(&raw), raw }
    }

    /// Id of the note document or task record the item came from
    pub fn doc_id(&self) -> &str {
        &self.raw.source_doc_id
    }

    /// To-do text without the checkbox prefix
    ///
    /// A second `[ ]` on the same line ends the to-do text.
    pub fn todo(&self) -> &str {
        match &self.raw.payload {
            Payload::NoteLine { text, .. } => match text.split(UNCHECKED).nth(1) {
                Some(body) => body.trim(),
                None => text.trim(),
            },
            Payload::TaskRecord { text } => text,
        }
    }

    /// To-do text with the priority tags removed, without colors
    pub fn plain_text(&self) -> String {
        let todo = self.todo();
        if todo.contains(HIGH_PRIORITY_TAG) {
            todo.replace(HIGH_PRIORITY_TAG, "").trim().to_string()
        } else if todo.contains(MEDIUM_PRIORITY_TAG) {
            todo.replace(MEDIUM_PRIORITY_TAG, "").trim().to_string()
        } else {
            todo.to_string()
        }
    }

    /// Source tag followed by the colorized to-do text
    ///
    /// Note text and titles are stripped of escape sequences before display.
    pub fn display_text(&self) -> String {
        let todo = self.todo();
        let plain = strip_ansi_codes(&self.plain_text());
        let body = if todo.contains(HIGH_PRIORITY_TAG) {
            red(plain)
        } else if todo.contains(MEDIUM_PRIORITY_TAG) {
            yellow(plain)
        } else {
            plain
        };

        match &self.raw.payload {
            Payload::NoteLine { note_title, .. } => {
                match note_title.as_deref().filter(|t| !t.is_empty()) {
                    Some(title) => {
                        format!("{}\t{}", shorten_title(&strip_ansi_codes(title)), body)
                    }
                    None => format!("{}\t\t{}", NOTE_TAG, body),
                }
            }
            Payload::TaskRecord { .. } => format!("{}\t\t{}", CLI_TAG, body),
        }
    }

    pub fn priority(&self) -> u8 {
        priority_of(self.raw.payload.text())
    }

    /// Parsed version token; falls back to the epoch for unreadable tokens
    pub fn version(&self) -> DateTime<Utc> {
        parse_version(&self.raw.source_version).unwrap_or_else(|| {
            warn!(
                "event=bad_version doc_id={} version={:?}",
                self.raw.source_doc_id, self.raw.source_version
            );
            DateTime::from_timestamp_nanos(0)
        })
    }

    /// Local-time display date, omitting the year for the current year
    pub fn date(&self) -> String {
        let local = self.version().with_timezone(&Local);
        format_todo_date(&local, Local::now().year())
    }
}

fn shorten_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(SHORT_TITLE_CHARS).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}
