use redline_config::RedlineConfig;
use redline_core::entities::Comment;
use redline_docx::comments;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::document;
use crate::output::output_listing;

const HEADERS: [&str; 6] = ["id", "comment_id", "author", "date", "text", "excerpt"];

/// Handle `redline list-comments`.
pub fn handle(args: &ListArgs, config: &RedlineConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let comments = list(&args.document, config.display.excerpt_chars)?;
    let rows: Vec<Vec<String>> = comments
        .iter()
        .map(|comment| {
            vec![
                comment.id.to_string(),
                comment.comment_id.clone(),
                comment.author.clone(),
                comment.date.clone().unwrap_or_else(|| "-".to_string()),
                comment.text.clone(),
                comment.excerpt.clone(),
            ]
        })
        .collect();
    output_listing(&comments, flags.format, &HEADERS, &rows, "No comments found.")
}

pub fn list(path: &str, excerpt_chars: usize) -> anyhow::Result<Vec<Comment>> {
    let mut package = document::open(path)?;
    let (document, comment_part) = package.trees()?;
    let listed = comments::enumerate(document, comment_part, excerpt_chars);
    tracing::debug!(count = listed.len(), "listed comments");
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::commands::test_support::{comment_on, plain_document};

    #[test]
    fn document_without_comments_part_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let path = plain_document(dir.path());
        assert!(list(&path, 100).unwrap().is_empty());
    }

    #[test]
    fn excerpt_is_bounded_prefix_of_anchor_paragraph() {
        let dir = TempDir::new().unwrap();
        let path = plain_document(dir.path());
        comment_on(&path, "Check this", "Rae Quinn");

        let listed = list(&path, 5).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 1);
        assert_eq!(listed[0].comment_id, "1");
        assert_eq!(listed[0].author, "Rae Quinn");
        assert_eq!(listed[0].initials, "RQ");
        assert_eq!(listed[0].text, "Check this");
        assert_eq!(listed[0].excerpt, "The q");
    }
}
