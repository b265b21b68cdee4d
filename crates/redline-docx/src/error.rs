//! Error taxonomy for package access, parsing, and mutation.

use std::path::PathBuf;

use redline_core::enums::ChangeKind;
use thiserror::Error;

/// Errors from the document engine.
#[derive(Debug, Error)]
pub enum DocxError {
    /// The input path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The input path does not carry a `.docx` extension.
    #[error("File must be a .docx file: {}", path.display())]
    NotADocx { path: PathBuf },

    /// The input is not a readable zip archive.
    #[error("Not a valid document archive: {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// A required part is absent from the archive.
    #[error("Invalid document structure: missing part '{part}'")]
    MissingPart { part: String },

    /// A part could not be parsed as XML.
    #[error("Malformed XML in '{part}': {reason}")]
    MalformedXml { part: String, reason: String },

    /// The document part has no body element to write into.
    #[error("Invalid document structure: no body element in the document part")]
    MissingBody,

    /// A 1-based paragraph anchor points past the end of the body.
    #[error("Paragraph {index} does not exist (document has {available})")]
    AnchorOutOfRange { index: usize, available: usize },

    /// No element matches the requested change (stale id or altered tree).
    #[error("Change {id} not found ({kind} by {author}); list changes again and retry")]
    ChangeNotFound {
        id: u32,
        kind: ChangeKind,
        author: String,
    },

    /// Only textual marks can be inserted.
    #[error("Cannot insert a {0} mark; use insertion or deletion")]
    UnsupportedInsert(ChangeKind),

    /// No change carries the requested sequence id.
    #[error("Change ID {0} not found; run 'redline list-changes' to see available IDs")]
    UnknownChangeId(u32),

    /// Existing ids already reach the largest representable id.
    #[error("No free {what} id: existing ids reach {max}")]
    IdSpaceExhausted { what: &'static str, max: u64 },

    /// The confirmation gate was not passed.
    #[error("Cancelled: no changes were written")]
    UserCancelled,

    /// Staging or the atomic replace of the destination failed.
    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },
}

impl DocxError {
    /// Whether the error belongs to the malformed-document class: a required
    /// part is absent or a part is unparsable.
    #[must_use]
    pub const fn is_malformed_document(&self) -> bool {
        matches!(
            self,
            Self::MissingPart { .. } | Self::MalformedXml { .. } | Self::MissingBody
        )
    }

    /// Whether the requested change could not be located.
    #[must_use]
    pub const fn is_change_not_found(&self) -> bool {
        matches!(self, Self::ChangeNotFound { .. } | Self::UnknownChangeId(_))
    }

    pub(crate) fn malformed(part: &str, reason: impl ToString) -> Self {
        Self::MalformedXml {
            part: part.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
