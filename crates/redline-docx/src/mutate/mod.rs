//! Mutation engine: resolves pending marks and inserts new marks and
//! comments.
//!
//! Every operation works on an in-memory tree. Nothing reaches disk until
//! the caller hands the package to [`crate::DocumentPackage::write_back`].

mod insert;

pub use insert::{Anchor, NewComment, NewMark, add_comment, insert_comment, insert_mark};

use redline_core::enums::{ChangeKind, Resolution};

use crate::error::DocxError;
use crate::revisions::{RevisionMark, identity_at, wrapper_name};
use crate::xml::names::w;
use crate::xml::{DocumentTree, NodeId};

/// Accept a mark: insertions become plain content, deletions disappear,
/// formatting changes adopt the recorded properties.
///
/// # Errors
///
/// Returns [`DocxError::ChangeNotFound`] if the mark's wrapper is no longer
/// in the tree or no longer matches the enumerated identity.
pub fn apply(tree: &mut DocumentTree, mark: &RevisionMark) -> Result<(), DocxError> {
    resolve(tree, mark, Resolution::Applied)
}

/// Discard a mark: insertions disappear, deletions are restored as live
/// text, formatting changes are dropped.
///
/// # Errors
///
/// Same as [`apply`].
pub fn reject(tree: &mut DocumentTree, mark: &RevisionMark) -> Result<(), DocxError> {
    resolve(tree, mark, Resolution::Rejected)
}

/// Resolve one mark either way.
///
/// # Errors
///
/// Same as [`apply`].
pub fn resolve(
    tree: &mut DocumentTree,
    mark: &RevisionMark,
    resolution: Resolution,
) -> Result<(), DocxError> {
    let node = locate(tree, mark)?;
    match (mark.kind(), resolution) {
        (ChangeKind::Insertion, Resolution::Applied) => {
            tree.unwrap(node);
        }
        (ChangeKind::Deletion, Resolution::Rejected) => {
            restore_deleted_text(tree, node);
            tree.unwrap(node);
        }
        (ChangeKind::Insertion, Resolution::Rejected)
        | (ChangeKind::Deletion, Resolution::Applied)
        | (
            ChangeKind::RunFormatting | ChangeKind::ParagraphFormatting,
            Resolution::Rejected,
        ) => tree.remove(node),
        (ChangeKind::RunFormatting | ChangeKind::ParagraphFormatting, Resolution::Applied) => {
            adopt_recorded_properties(tree, node, mark.kind());
        }
    }
    tracing::debug!(
        id = mark.id(),
        kind = %mark.kind(),
        author = mark.author(),
        ?resolution,
        "mutate: resolved mark"
    );
    Ok(())
}

/// Restricts a batch by author and/or kind. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFilter {
    pub author: Option<String>,
    pub kind: Option<ChangeKind>,
}

impl ChangeFilter {
    #[must_use]
    pub fn matches(&self, mark: &RevisionMark) -> bool {
        self.author.as_deref().is_none_or(|author| mark.author() == author)
            && self.kind.is_none_or(|kind| mark.kind() == kind)
    }

    /// Marks that pass the filter, in enumeration order.
    #[must_use]
    pub fn select<'a>(&self, marks: &'a [RevisionMark]) -> Vec<&'a RevisionMark> {
        marks.iter().filter(|mark| self.matches(mark)).collect()
    }
}

/// Apply every mark in `selected` against one tree.
///
/// A mark that can no longer be located (for example because an earlier
/// mark in the batch removed its subtree) is skipped and not counted.
/// Returns the number of marks actually applied.
pub fn apply_batch(tree: &mut DocumentTree, selected: &[&RevisionMark]) -> usize {
    let mut applied = 0;
    for mark in selected {
        match apply(tree, mark) {
            Ok(()) => applied += 1,
            Err(err) => tracing::warn!(id = mark.id(), error = %err, "mutate: skipped mark"),
        }
    }
    tracing::info!(selected = selected.len(), applied, "mutate: batch applied");
    applied
}

fn locate(tree: &DocumentTree, mark: &RevisionMark) -> Result<NodeId, DocxError> {
    let node = mark.node();
    let matches = tree.is_attached(node)
        && tree.is(node, wrapper_name(mark.kind()))
        && identity_at(tree, node, mark.kind()) == mark.identity();
    if matches {
        Ok(node)
    } else {
        Err(DocxError::ChangeNotFound {
            id: mark.id(),
            kind: mark.kind(),
            author: mark.author().to_string(),
        })
    }
}

fn restore_deleted_text(tree: &mut DocumentTree, node: NodeId) {
    for leaf in tree.find_all(node, w::DEL_TEXT) {
        tree.rename(leaf, w::T);
    }
    for leaf in tree.find_all(node, w::DEL_INSTR_TEXT) {
        tree.rename(leaf, w::INSTR_TEXT);
    }
}

/// Swap the properties element holding `change` for the properties the
/// change recorded. Paragraph run-mark properties and section properties
/// stay with the paragraph.
fn adopt_recorded_properties(tree: &mut DocumentTree, change: NodeId, kind: ChangeKind) {
    let properties = match kind {
        ChangeKind::ParagraphFormatting => w::PPR,
        _ => w::RPR,
    };
    let Some(holder) = tree.parent(change).filter(|parent| tree.is(*parent, properties)) else {
        tree.remove(change);
        return;
    };

    let mut adopted: Vec<NodeId> = tree
        .child_elements(change, properties)
        .first()
        .map(|recorded| tree.children(*recorded).to_vec())
        .unwrap_or_default();
    if kind == ChangeKind::ParagraphFormatting {
        adopted.extend(
            tree.children(holder)
                .iter()
                .copied()
                .filter(|child| tree.is(*child, w::RPR) || tree.is(*child, w::SECT_PR)),
        );
    }
    tree.replace_children_with(holder, adopted);
}
