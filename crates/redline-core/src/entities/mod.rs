//! Entity structs as presented to users.
//!
//! These are plain snapshots. They carry no handle into a parsed document;
//! the engine in `redline-docx` keeps that association itself.

mod change;
mod comment;

pub use change::{Change, FORMATTING_SENTINEL};
pub use comment::{Comment, derive_initials};

/// First `max_chars` characters of `value`, with `...` appended when cut.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
