use redline_config::RedlineConfig;
use redline_core::entities::Change;
use redline_docx::revisions::{self, RevisionMark};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::document;
use crate::output::output_listing;

const HEADERS: [&str; 5] = ["id", "kind", "author", "date", "text"];

/// Handle `redline list-changes`.
pub fn handle(args: &ListArgs, config: &RedlineConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let changes = list(&args.document)?;
    let rows = rows(&changes, config.display.preview_chars);
    output_listing(
        &changes,
        flags.format,
        &HEADERS,
        &rows,
        "No tracked changes found.",
    )
}

pub fn list(path: &str) -> anyhow::Result<Vec<Change>> {
    let package = document::open(path)?;
    let changes: Vec<Change> = revisions::enumerate(package.document())
        .iter()
        .map(RevisionMark::to_change)
        .collect();
    tracing::debug!(count = changes.len(), "listed tracked changes");
    Ok(changes)
}

fn rows(changes: &[Change], preview_chars: usize) -> Vec<Vec<String>> {
    changes
        .iter()
        .map(|change| {
            vec![
                change.id.to_string(),
                change.kind.label().to_string(),
                change.author.clone(),
                change.date.clone().unwrap_or_else(|| "-".to_string()),
                change.preview(preview_chars),
            ]
        })
        .collect()
}
