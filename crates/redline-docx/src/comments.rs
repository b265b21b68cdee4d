//! Comment catalog: lists comment definitions with their anchored excerpts.

use redline_core::entities::Comment;
use redline_core::timestamps;

use crate::revisions::{UNKNOWN_AUTHOR, parse_id};
use crate::xml::DocumentTree;
use crate::xml::names::w;

/// Comments defined in `comments`, in part order, numbered from 1.
///
/// `comments` is `None` when the package has no comments part; that yields
/// an empty listing. Each excerpt is the first `excerpt_chars` characters of
/// the paragraph holding the matching comment reference, or empty when the
/// comment has no reference in `document`.
#[must_use]
pub fn enumerate(
    document: &DocumentTree,
    comments: Option<&DocumentTree>,
    excerpt_chars: usize,
) -> Vec<Comment> {
    let Some(comments) = comments else {
        return Vec::new();
    };
    let references = document.find_all(document.root(), w::COMMENT_REFERENCE);

    let mut out = Vec::new();
    for (index, node) in comments
        .find_all(comments.root(), w::COMMENT)
        .into_iter()
        .enumerate()
    {
        let comment_id = comments.attribute(node, w::ID).unwrap_or_default().to_string();
        let excerpt = references
            .iter()
            .filter(|reference| document.attribute(**reference, w::ID) == Some(comment_id.as_str()))
            .filter_map(|reference| document.ancestor(*reference, w::P))
            .last()
            .map(|paragraph| prefix(&document.text(paragraph, &[w::T]), excerpt_chars))
            .unwrap_or_default();

        out.push(Comment {
            id: u32::try_from(index + 1).unwrap_or(u32::MAX),
            comment_id,
            author: comments
                .attribute(node, w::AUTHOR)
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            initials: comments
                .attribute(node, w::INITIALS)
                .unwrap_or_default()
                .to_string(),
            date: comments.attribute(node, w::DATE).and_then(timestamps::display),
            text: comments.text(node, &[w::T]),
            excerpt,
        });
    }
    tracing::debug!(comments = out.len(), "comments: enumerated");
    out
}

/// Highest numeric comment id in the comments part, or 0.
#[must_use]
pub fn max_comment_id(comments: &DocumentTree) -> u64 {
    comments
        .find_all(comments.root(), w::COMMENT)
        .into_iter()
        .filter_map(|node| comments.attribute(node, w::ID))
        .filter_map(parse_id)
        .max()
        .unwrap_or(0)
}

fn prefix(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
