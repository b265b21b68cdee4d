use redline_config::RedlineConfig;
use redline_core::responses::InsertCommentResponse;
use redline_core::timestamps;
use redline_docx::mutate::{self, NewComment};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InsertCommentArgs;
use crate::commands::shared::document;
use crate::commands::shared::parse::require_text;
use crate::output::output;

/// Handle `redline insert-comment`.
pub fn handle(
    args: &InsertCommentArgs,
    config: &RedlineConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&run(args, config)?, flags.format)
}

pub fn run(
    args: &InsertCommentArgs,
    config: &RedlineConfig,
) -> anyhow::Result<InsertCommentResponse> {
    let author = args
        .author
        .clone()
        .unwrap_or_else(|| config.author.name.clone());
    let comment = NewComment {
        text: require_text(&args.text, "--text")?.to_string(),
        initials: args
            .initials
            .clone()
            .unwrap_or_else(|| config.author.initials_for(&author)),
        author,
        date: timestamps::now_iso(),
    };

    let mut package = document::open(&args.document)?;
    let comment_id = mutate::add_comment(&mut package, &comment, document::anchor(args.paragraph))?;
    let destination = document::destination(&args.document, args.output.as_deref());
    let output = document::commit(package, &destination)?;

    Ok(InsertCommentResponse {
        comment_id,
        author: comment.author,
        initials: comment.initials,
        date: comment.date,
        text: comment.text,
        output,
    })
}
