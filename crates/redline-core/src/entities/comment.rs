use serde::{Deserialize, Serialize};

/// A review comment together with the document text it is anchored to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Sequence number within one listing.
    pub id: u32,
    /// Numeric id stored in the comments part; joins the comment to its anchors.
    pub comment_id: String,
    pub author: String,
    pub initials: String,
    pub date: Option<String>,
    pub text: String,
    /// Prefix of the paragraph holding the comment reference; empty when unanchored.
    pub excerpt: String,
}

/// Initials from the first letter of up to three words, upper-cased.
///
/// `"Ada King Lovelace Byron"` becomes `"AKL"`.
#[must_use]
pub fn derive_initials(author: &str) -> String {
    author
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(3)
        .collect()
}
