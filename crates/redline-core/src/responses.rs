//! CLI response types returned by `redline` commands.
//!
//! These structs define the shape of the JSON (or table) output for the
//! mutating commands. Listings return `Vec<Change>` / `Vec<Comment>` directly.

use serde::{Deserialize, Serialize};

use crate::entities::Change;
use crate::enums::{ChangeKind, Resolution};

/// Response from `redline apply-change` and `redline reject-change`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveResponse {
    pub resolution: Resolution,
    pub change: Change,
    pub output: String,
}

/// Response from `redline apply-all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchApplyResponse {
    /// Marks that survived the filters and were presented.
    pub selected: u32,
    /// Marks actually applied; lower than `selected` when a match was lost.
    pub applied: u32,
    pub author_filter: Option<String>,
    pub kind_filter: Option<ChangeKind>,
    /// `None` when nothing was written.
    pub output: Option<String>,
}

/// Response from `redline insert-change`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertChangeResponse {
    pub kind: ChangeKind,
    pub revision_id: u64,
    pub author: String,
    pub date: String,
    pub text: String,
    pub output: String,
}

/// Response from `redline insert-comment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertCommentResponse {
    pub comment_id: u64,
    pub author: String,
    pub initials: String,
    pub date: String,
    pub text: String,
    pub output: String,
}

/// Response from `redline create-document`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDocumentResponse {
    pub output: String,
    pub title: Option<String>,
    pub initial_text: Option<String>,
}
