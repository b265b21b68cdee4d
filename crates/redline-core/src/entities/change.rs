use serde::{Deserialize, Serialize};

use crate::enums::ChangeKind;

/// Text reported for formatting-only marks, which wrap no literal text.
pub const FORMATTING_SENTINEL: &str = "[Formatting change]";

/// A pending revision mark as listed by the revision catalog.
///
/// `id` is a sequence number valid only for the enumeration that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Change {
    pub id: u32,
    pub kind: ChangeKind,
    pub author: String,
    pub date: Option<String>,
    pub text: String,
}

impl Change {
    /// First `max_chars` characters of the text, with an ellipsis when cut.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        super::truncate_chars(&self.text, max_chars)
    }
}
