//! Revision catalog: enumerates pending revision marks in a document tree.
//!
//! Scan order is insertions, deletions, run-formatting changes, then
//! paragraph-formatting changes, each in document order. Sequence ids are
//! assigned `1..=N` over that concatenation on every call, so they are only
//! meaningful until the tree is next mutated.

use redline_core::entities::{Change, FORMATTING_SENTINEL};
use redline_core::enums::ChangeKind;
use redline_core::timestamps;

use crate::error::DocxError;
use crate::xml::names::{XName, w};
use crate::xml::{DocumentTree, NodeId};

/// Author reported when a mark carries no author attribute.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Content fingerprint of a mark: `(kind, author, extracted text)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeIdentity {
    pub kind: ChangeKind,
    pub author: String,
    pub text: String,
}

/// One enumerated revision mark.
///
/// Holds the arena handle of its wrapper element, so it addresses the exact
/// element it was read from rather than a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionMark {
    id: u32,
    kind: ChangeKind,
    author: String,
    date: Option<String>,
    text: String,
    node: NodeId,
}

impl RevisionMark {
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Raw date attribute, if present.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Handle of the wrapper element at enumeration time.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn identity(&self) -> ChangeIdentity {
        ChangeIdentity {
            kind: self.kind,
            author: self.author.clone(),
            text: self.text.clone(),
        }
    }

    /// User-facing snapshot with a display-formatted date.
    #[must_use]
    pub fn to_change(&self) -> Change {
        Change {
            id: self.id,
            kind: self.kind,
            author: self.author.clone(),
            date: self.date.as_deref().and_then(timestamps::display),
            text: self.text.clone(),
        }
    }
}

/// Wrapper element for each kind of mark.
#[must_use]
pub const fn wrapper_name(kind: ChangeKind) -> XName {
    match kind {
        ChangeKind::Insertion => w::INS,
        ChangeKind::Deletion => w::DEL,
        ChangeKind::RunFormatting => w::RPR_CHANGE,
        ChangeKind::ParagraphFormatting => w::PPR_CHANGE,
    }
}

/// Text leaves whose content makes up a mark's text.
const fn text_leaves(kind: ChangeKind) -> &'static [XName] {
    match kind {
        ChangeKind::Insertion => &[w::T],
        ChangeKind::Deletion => &[w::DEL_TEXT, w::T],
        ChangeKind::RunFormatting | ChangeKind::ParagraphFormatting => &[],
    }
}

/// All pending marks, in scan order, numbered from 1.
#[must_use]
pub fn enumerate(tree: &DocumentTree) -> Vec<RevisionMark> {
    let mut marks = Vec::new();
    let mut next_id = 1u32;
    for kind in ChangeKind::ALL {
        for node in tree.find_all(tree.root(), wrapper_name(kind)) {
            let identity = identity_at(tree, node, kind);
            marks.push(RevisionMark {
                id: next_id,
                kind,
                author: identity.author,
                date: tree
                    .attribute(node, w::DATE)
                    .filter(|date| !date.is_empty())
                    .map(str::to_string),
                text: identity.text,
                node,
            });
            next_id += 1;
        }
    }
    tracing::debug!(marks = marks.len(), "revisions: enumerated");
    marks
}

/// Identity of the element at `node`, read as a mark of `kind`.
#[must_use]
pub fn identity_at(tree: &DocumentTree, node: NodeId, kind: ChangeKind) -> ChangeIdentity {
    let author = tree
        .attribute(node, w::AUTHOR)
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();
    let text = if kind.is_textual() {
        tree.text(node, text_leaves(kind))
    } else {
        FORMATTING_SENTINEL.to_string()
    };
    ChangeIdentity { kind, author, text }
}

/// Look up a mark by its sequence id.
///
/// # Errors
///
/// Returns [`DocxError::UnknownChangeId`] if no mark has that id.
pub fn find(marks: &[RevisionMark], id: u32) -> Result<&RevisionMark, DocxError> {
    marks
        .iter()
        .find(|mark| mark.id == id)
        .ok_or(DocxError::UnknownChangeId(id))
}

/// Highest numeric `w:id` on any revision wrapper, or 0.
#[must_use]
pub fn max_revision_id(tree: &DocumentTree) -> u64 {
    ChangeKind::ALL
        .into_iter()
        .flat_map(|kind| tree.find_all(tree.root(), wrapper_name(kind)))
        .filter_map(|node| tree.attribute(node, w::ID))
        .filter_map(parse_id)
        .max()
        .unwrap_or(0)
}

/// Numeric value of a `w:id` attribute. Digit strings too long for `u64`
/// saturate so that allocation past them fails instead of skipping them.
pub(crate) fn parse_id(raw: &str) -> Option<u64> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
