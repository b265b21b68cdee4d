//! Human-readable summaries shown before a destructive write.

use std::fmt::Write as _;

use redline_core::entities::Change;
use redline_core::enums::ChangeKind;

const RULE_WIDTH: usize = 60;

/// Summary of a single change about to be applied or rejected.
#[must_use]
pub fn render_change_proposal(action: &str, change: &Change, preview_chars: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Change to {action}:");
    let _ = writeln!(out, "  ID:     {}", change.id);
    let _ = writeln!(out, "  Type:   {}", change.kind.label());
    let _ = writeln!(out, "  Author: {}", change.author);
    if let Some(date) = &change.date {
        let _ = writeln!(out, "  Date:   {date}");
    }
    let _ = write!(out, "  Text:   {:?}", change.preview(preview_chars));
    out
}

/// Summary of every change an `apply-all` run would touch.
#[must_use]
pub fn render_batch_proposal(
    changes: &[Change],
    author: Option<&str>,
    kind: Option<ChangeKind>,
    preview_chars: usize,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "Changes to apply: {}", changes.len());
    if let Some(author) = author {
        let _ = writeln!(out, "  Filtered by author: {author}");
    }
    if let Some(kind) = kind {
        let _ = writeln!(out, "  Filtered by type:   {}", kind.label());
    }
    let _ = writeln!(out, "{rule}");
    for change in changes {
        let _ = writeln!(
            out,
            "[{}] {} by {}: {:?}",
            change.id,
            change.kind.label(),
            change.author,
            change.preview(preview_chars)
        );
    }
    out.push_str(&rule);
    out
}
