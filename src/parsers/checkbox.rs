use crate::models::RawItem;
use crate::models::fields::{CONTENT_FIELD, TITLE_FIELD};
use crate::store::Record;

/// Unchecked Markdown checkbox
pub const UNCHECKED: &str = "[ ]";
/// Checked Markdown checkbox
pub const CHECKED: &str = "[x]";

/// Scan a note's content and return one item per line holding an unchecked checkbox
///
/// Lines are numbered from 1 and every line counts, blank ones included.
/// `\n` and `\r\n` both end a line; a trailing line break does not open an
/// extra empty line. The marker is matched as a literal substring anywhere in
/// the line.
///
/// # Examples
///
/// ```
/// use todos::parsers::scan_document;
///
/// let items = scan_document("abc12xyz99", "1700000000000000000", None, "intro\n- [ ] p:H buy milk\nend");
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].line_number(), Some(2));
/// ```
pub fn scan_document(
    doc_id: &str,
    version: &str,
    title: Option<&str>,
    content: &str,
) -> Vec<RawItem> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(UNCHECKED))
        .map(|(idx, line)| {
            RawItem::note_line(doc_id, version, line, idx + 1, title.map(str::to_string))
        })
        .collect()
}

/// Scan a note record from the store
///
/// Records without a string `content` field have no to-dos; that is not an error.
pub fn scan_record(record: &Record) -> Vec<RawItem> {
    match record.get_str(CONTENT_FIELD) {
        Some(content) => {
            scan_document(&record.id, &record.version, record.get_str(TITLE_FIELD), content)
        }
        None => Vec::new(),
    }
}
