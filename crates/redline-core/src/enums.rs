//! Revision mark kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ChangeKind
// ---------------------------------------------------------------------------

/// Kind of a pending revision mark.
///
/// The declaration order is the catalog scan order: insertions, deletions,
/// run-formatting changes, paragraph-formatting changes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insertion,
    Deletion,
    RunFormatting,
    ParagraphFormatting,
}

impl ChangeKind {
    /// Every kind, in catalog scan order.
    pub const ALL: [Self; 4] = [
        Self::Insertion,
        Self::Deletion,
        Self::RunFormatting,
        Self::ParagraphFormatting,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Deletion => "deletion",
            Self::RunFormatting => "run_formatting",
            Self::ParagraphFormatting => "paragraph_formatting",
        }
    }

    /// Human-readable label used in proposals and tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insertion => "Insertion",
            Self::Deletion => "Deletion",
            Self::RunFormatting => "Formatting (Run)",
            Self::ParagraphFormatting => "Formatting (Paragraph)",
        }
    }

    /// Whether the mark wraps literal text (as opposed to a pure formatting change).
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Insertion | Self::Deletion)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = CoreError;

    /// Accepts the snake_case name, a hyphenated alias, or the display label.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str() == normalized || kind.label().to_ascii_lowercase() == normalized
            })
            .ok_or_else(|| CoreError::UnknownKind(raw.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// What was done to a revision mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The proposed change was made permanent.
    Applied,
    /// The proposed change was discarded.
    Rejected,
}

impl Resolution {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
