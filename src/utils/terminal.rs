//! Terminal colors and output sanitization
//!
//! Coloring is a set of pure functions wrapping text in ANSI sequences; there is
//! no global color state. [`strip_ansi_codes`] undoes them (and removes any other
//! escape sequences), which is how plain to-do text is recovered for matching
//! and for tests.

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[;33m";
const RESET: &str = "\x1b[0;0m";

fn paint(color: &str, text: impl AsRef<str>) -> String {
    format!("{}{}{}", color, text.as_ref(), RESET)
}

/// High priority to-dos
pub fn red(text: impl AsRef<str>) -> String {
    paint(RED, text)
}

/// Medium priority to-dos
pub fn yellow(text: impl AsRef<str>) -> String {
    paint(YELLOW, text)
}

/// Confirmations
pub fn green(text: impl AsRef<str>) -> String {
    paint(GREEN, text)
}

/// Removes ANSI escape sequences and stray control characters
///
/// Note lines, titles and task actions are user data and are passed through
/// here before being printed, so a note cannot move the cursor or recolor the
/// terminal. Tab, newline and carriage return are kept.
///
/// # Examples
///
/// ```
/// use todos::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    // CSI sequences: ESC [ params letter
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next_ch) = chars.peek() {
                    chars.next();
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}
